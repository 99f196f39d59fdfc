use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::List;
use crate::Error;

/// Insert all the specified values at the head of the list stored at key. If key does not exist,
/// it is created as empty list before performing the push operations. Elements are inserted one
/// after the other, so `LPUSH mylist a b c` leaves `c` at the head.
///
/// Ref: <https://redis.io/docs/latest/commands/lpush/>
#[derive(Debug, PartialEq)]
pub struct Lpush {
    pub key: Bytes,
    pub values: Vec<Bytes>,
}

impl Executable for Lpush {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let len = ctx.upsert(&self.key, |list: &mut List| {
            for value in self.values {
                list.push_front(value);
            }
            list.len()
        })?;

        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Lpush {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let values = parser.remaining_bytes()?;

        Ok(Self { key, values })
    }
}
