use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::lpop::{parse_count, pop_reply};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::List;
use crate::Error;

/// Removes and returns the last elements of the list stored at key.
///
/// Ref: <https://redis.io/docs/latest/commands/rpop/>
#[derive(Debug, PartialEq)]
pub struct Rpop {
    pub key: Bytes,
    pub count: Option<usize>,
}

impl Executable for Rpop {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let popped = ctx.update(&self.key, |list: &mut List| {
            let count = self.count.unwrap_or(1).min(list.len());
            list.drain(list.len() - count..).rev().collect::<Vec<_>>()
        })?;

        Ok(pop_reply(popped, self.count.is_some()))
    }
}

impl TryFrom<&mut CommandParser> for Rpop {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let count = parse_count(parser)?;

        Ok(Self { key, count })
    }
}
