use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::Hash;
use crate::Error;

/// Returns the values associated with the specified fields in the hash stored at key. For every
/// field that does not exist in the hash, a nil value is returned.
///
/// Ref: <https://redis.io/docs/latest/commands/hmget/>
#[derive(Debug, PartialEq)]
pub struct Hmget {
    pub key: Bytes,
    pub fields: Vec<Bytes>,
}

impl Executable for Hmget {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let hash = ctx.get_as::<Hash>(&self.key)?;

        let values = self
            .fields
            .iter()
            .map(|field| Frame::optional_bulk(hash.and_then(|hash| hash.get(field).cloned())))
            .collect();

        Ok(Frame::Array(values))
    }
}

impl TryFrom<&mut CommandParser> for Hmget {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let fields = parser.remaining_bytes()?;

        Ok(Self { key, fields })
    }
}
