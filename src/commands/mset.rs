use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Sets the given keys to their respective values. MSET replaces existing values with new values,
/// just as regular SET.
///
/// Ref: <https://redis.io/docs/latest/commands/mset/>
#[derive(Debug, PartialEq)]
pub struct Mset {
    pub pairs: Vec<(Bytes, Bytes)>,
}

impl Executable for Mset {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        for (key, value) in self.pairs {
            ctx.set(key, value);
        }

        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Mset {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let pairs = parser.remaining_pairs()?;
        Ok(Self { pairs })
    }
}
