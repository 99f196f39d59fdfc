use strum_macros::EnumString;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Delete all the keys of the database. There is a single database, so `FLUSHALL` is the same
/// command.
///
/// Ref: <https://redis.io/docs/latest/commands/flushdb/>
#[derive(Debug, PartialEq)]
pub struct FlushDb;

#[derive(Debug, PartialEq, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
enum FlushMode {
    Sync,
    Async,
}

impl Executable for FlushDb {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        ctx.flush();
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for FlushDb {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        // Both modes flush synchronously.
        if parser.has_next() {
            parser.next_keyword::<FlushMode>()?;
        }
        Ok(Self)
    }
}
