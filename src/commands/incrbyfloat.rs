use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Increment the string representing a floating point number stored at key by the specified
/// increment. By using a negative increment value, the result is that the value stored at the key
/// is decremented (by the obvious properties of addition). If the key does not exist, it is set to
/// 0 before performing the operation.
///
/// The result is stored, and replied, in its shortest round-trip form: `10.5 + 0.1` is `10.6`.
///
/// Ref: <https://redis.io/docs/latest/commands/incrbyfloat/>
#[derive(Debug, PartialEq)]
pub struct IncrByFloat {
    pub key: Bytes,
    pub increment: f64,
}

impl Executable for IncrByFloat {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let value = ctx.incr_by_float(&self.key, self.increment)?;
        Ok(Frame::Bulk(Bytes::from(value.to_string())))
    }
}

impl TryFrom<&mut CommandParser> for IncrByFloat {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let increment = parser.next_float()?;

        Ok(Self { key, increment })
    }
}
