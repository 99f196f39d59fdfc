use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::expire::expire_in;
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Works exactly like `EXPIRE` but the time to live of the key is specified in milliseconds.
///
/// Ref: <https://redis.io/docs/latest/commands/pexpire/>
#[derive(Debug, PartialEq)]
pub struct Pexpire {
    pub key: Bytes,
    pub milliseconds: i64,
}

impl Executable for Pexpire {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        Ok(expire_in(ctx, &self.key, self.milliseconds))
    }
}

impl TryFrom<&mut CommandParser> for Pexpire {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let milliseconds = parser.next_integer()?;
        Ok(Self { key, milliseconds })
    }
}
