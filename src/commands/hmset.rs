use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::hset::insert_fields;
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Sets the specified fields to their respective values in the hash stored at key. Same as `HSET`
/// but replies `OK`.
///
/// Ref: <https://redis.io/docs/latest/commands/hmset/>
#[derive(Debug, PartialEq)]
pub struct Hmset {
    pub key: Bytes,
    pub fields: Vec<(Bytes, Bytes)>,
}

impl Executable for Hmset {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        insert_fields(ctx, &self.key, self.fields)?;
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Hmset {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let fields = parser.remaining_pairs()?;

        Ok(Self { key, fields })
    }
}
