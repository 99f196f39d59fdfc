use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::Set;
use crate::Error;

/// Returns all the members of the set value stored at key, in no particular order.
///
/// Ref: <https://redis.io/docs/latest/commands/smembers/>
#[derive(Debug, PartialEq)]
pub struct Smembers {
    pub key: Bytes,
}

impl Executable for Smembers {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let members = ctx
            .get_as::<Set>(&self.key)?
            .map(|set| set.iter().cloned().collect::<Vec<_>>())
            .unwrap_or_default();

        Ok(Frame::bulk_array(members))
    }
}

impl TryFrom<&mut CommandParser> for Smembers {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
