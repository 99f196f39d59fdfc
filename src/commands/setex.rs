use bytes::Bytes;
use tokio::time::Duration;

use crate::commands::executable::{Context, Executable};
use crate::commands::set::ttl_from;
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Set key to hold the string value and set key to timeout after a given number of seconds.
///
/// Ref: <https://redis.io/docs/latest/commands/setex/>
#[derive(Debug, PartialEq)]
pub struct Setex {
    pub key: Bytes,
    pub ttl: Duration,
    pub value: Bytes,
}

impl Executable for Setex {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        ctx.set_with_ttl(self.key, self.value, self.ttl);
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Setex {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let ttl = ttl_from("setex", parser.next_integer()?, 1000)?;
        let value = parser.next_bytes()?;

        Ok(Self { key, ttl, value })
    }
}
