use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::session::TransactionError;
use crate::Error;

/// Flushes all previously queued commands in a transaction and restores the connection state to
/// normal. Only meaningful inside a transaction, where the session handles it.
///
/// Ref: <https://redis.io/docs/latest/commands/discard/>
#[derive(Debug, PartialEq)]
pub struct Discard;

impl Executable for Discard {
    fn exec(self, _ctx: &mut Context) -> Result<Frame, Error> {
        Err(TransactionError::DiscardWithoutMulti.into())
    }
}

impl TryFrom<&mut CommandParser> for Discard {
    type Error = Error;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
