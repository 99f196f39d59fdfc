use bytes::Bytes;
use tokio::time::Duration;

use crate::commands::executable::{Context, Executable};
use crate::commands::set::ttl_from;
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// PSETEX works exactly like SETEX with the sole difference that the expire time is specified in
/// milliseconds instead of seconds.
///
/// Ref: <https://redis.io/docs/latest/commands/psetex/>
#[derive(Debug, PartialEq)]
pub struct Psetex {
    pub key: Bytes,
    pub ttl: Duration,
    pub value: Bytes,
}

impl Executable for Psetex {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        ctx.set_with_ttl(self.key, self.value, self.ttl);
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Psetex {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let ttl = ttl_from("psetex", parser.next_integer()?, 1)?;
        let value = parser.next_bytes()?;

        Ok(Self { key, ttl, value })
    }
}
