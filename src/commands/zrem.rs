use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::sorted_set::SortedSet;
use crate::Error;

/// Removes the specified members from the sorted set stored at key. Non existing members are
/// ignored. Replies the number of members removed.
///
/// Ref: <https://redis.io/docs/latest/commands/zrem/>
#[derive(Debug, PartialEq)]
pub struct Zrem {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl Executable for Zrem {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let removed = ctx.update(&self.key, |set: &mut SortedSet| {
            self.members
                .iter()
                .filter(|member| set.remove(member))
                .count()
        })?;

        Ok(Frame::Integer(removed.unwrap_or(0) as i64))
    }
}

impl TryFrom<&mut CommandParser> for Zrem {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let members = parser.remaining_bytes()?;

        Ok(Self { key, members })
    }
}
