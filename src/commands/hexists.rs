use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::Hash;
use crate::Error;

/// Returns if field is an existing field in the hash stored at key.
///
/// Ref: <https://redis.io/docs/latest/commands/hexists/>
#[derive(Debug, PartialEq)]
pub struct Hexists {
    pub key: Bytes,
    pub field: Bytes,
}

impl Executable for Hexists {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let found = ctx
            .get_as::<Hash>(&self.key)?
            .is_some_and(|hash| hash.contains_key(&self.field));

        Ok(Frame::Integer(found as i64))
    }
}

impl TryFrom<&mut CommandParser> for Hexists {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let field = parser.next_bytes()?;

        Ok(Self { key, field })
    }
}
