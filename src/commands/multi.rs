use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::session::TransactionError;
use crate::Error;

/// Marks the start of a transaction block. Subsequent commands will be queued for atomic
/// execution using `EXEC`.
///
/// Opening the transaction is up to the session. A `MULTI` that gets this far was issued inside
/// one already.
///
/// Ref: <https://redis.io/docs/latest/commands/multi/>
#[derive(Debug, PartialEq)]
pub struct Multi;

impl Executable for Multi {
    fn exec(self, _ctx: &mut Context) -> Result<Frame, Error> {
        Err(TransactionError::NestedMulti.into())
    }
}

impl TryFrom<&mut CommandParser> for Multi {
    type Error = Error;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
