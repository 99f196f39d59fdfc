use bytes::{BufMut, Bytes, BytesMut};

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::store::{StoreError, MAX_STRING_SIZE};
use crate::Error;

/// If key already exists and is a string, this command appends the value at the end of the
/// string. If key does not exist it is created and set as an empty string, so APPEND will be
/// similar to SET in this special case.
///
/// Ref: <https://redis.io/docs/latest/commands/append/>
#[derive(Debug, PartialEq)]
pub struct Append {
    pub key: Bytes,
    pub value: Bytes,
}

impl Executable for Append {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let value = match ctx.get_string(&self.key)? {
            Some(current) => {
                if current.len() + self.value.len() > MAX_STRING_SIZE {
                    return Err(StoreError::TooLarge.into());
                }
                let mut value = BytesMut::with_capacity(current.len() + self.value.len());
                value.put(&current[..]);
                value.put(&self.value[..]);
                value.freeze()
            }
            None => self.value,
        };

        let len = value.len();
        ctx.overwrite(self.key, value);

        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Append {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let value = parser.next_bytes()?;

        Ok(Self { key, value })
    }
}
