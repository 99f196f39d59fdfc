use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::Hash;
use crate::Error;

/// Returns all fields and values of the hash stored at key. In the returned value, every field
/// name is followed by its value.
///
/// Ref: <https://redis.io/docs/latest/commands/hgetall/>
#[derive(Debug, PartialEq)]
pub struct Hgetall {
    pub key: Bytes,
}

impl Executable for Hgetall {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let pairs = ctx
            .get_as::<Hash>(&self.key)?
            .map(|hash| {
                hash.iter()
                    .flat_map(|(field, value)| [field.clone(), value.clone()])
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Ok(Frame::bulk_array(pairs))
    }
}

impl TryFrom<&mut CommandParser> for Hgetall {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
