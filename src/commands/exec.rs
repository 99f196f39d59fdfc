use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::session::TransactionError;
use crate::Error;

/// Executes all previously queued commands in a transaction and restores the connection state to
/// normal.
///
/// The session replays the queue itself, so executing this command directly means there is no
/// transaction to run.
///
/// Ref: <https://redis.io/docs/latest/commands/exec/>
#[derive(Debug, PartialEq)]
pub struct Exec;

impl Executable for Exec {
    fn exec(self, _ctx: &mut Context) -> Result<Frame, Error> {
        Err(TransactionError::ExecWithoutMulti.into())
    }
}

impl TryFrom<&mut CommandParser> for Exec {
    type Error = Error;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
