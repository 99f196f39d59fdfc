use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Returns the bit value at offset in the string value stored at key. Offsets past the end of the
/// string, and missing keys, read as 0.
///
/// Ref: <https://redis.io/docs/latest/commands/getbit/>
#[derive(Debug, PartialEq)]
pub struct Getbit {
    pub key: Bytes,
    pub offset: usize,
}

impl Executable for Getbit {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let bit = ctx
            .get_string(&self.key)?
            .and_then(|value| value.get(self.offset / 8))
            .map_or(0, |byte| (byte >> (7 - self.offset % 8)) & 1);

        Ok(Frame::Integer(bit as i64))
    }
}

impl TryFrom<&mut CommandParser> for Getbit {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let offset = parser.next_bit_offset()?;

        Ok(Self { key, offset })
    }
}
