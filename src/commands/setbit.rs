use bytes::{Bytes, BytesMut};

use crate::commands::executable::{Context, Executable};
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::Error;

/// Sets or clears the bit at offset in the string value stored at key. The string is grown with
/// zero bytes to hold the offset. Replies the bit previously stored at offset.
///
/// Ref: <https://redis.io/docs/latest/commands/setbit/>
#[derive(Debug, PartialEq)]
pub struct Setbit {
    pub key: Bytes,
    pub offset: usize,
    pub value: bool,
}

impl Executable for Setbit {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let mut data = match ctx.get_string(&self.key)? {
            Some(current) => BytesMut::from(&current[..]),
            None => BytesMut::new(),
        };

        let index = self.offset / 8;
        let mask = 1u8 << (7 - self.offset % 8);

        if data.len() <= index {
            data.resize(index + 1, 0);
        }

        let previous = data[index] & mask != 0;
        if self.value {
            data[index] |= mask;
        } else {
            data[index] &= !mask;
        }

        ctx.overwrite(self.key, data.freeze());

        Ok(Frame::Integer(previous as i64))
    }
}

impl TryFrom<&mut CommandParser> for Setbit {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let offset = parser.next_bit_offset()?;
        let value = match parser.next_integer() {
            Ok(0) => false,
            Ok(1) => true,
            Ok(_) | Err(CommandParserError::InvalidInteger) => {
                return Err(CommandParserError::InvalidBit.into())
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self { key, offset, value })
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    fn setbit(store: &mut Keyspace, offset: usize, value: &'static str) -> Frame {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("SETBIT")),
            Frame::Bulk(Bytes::from("key1")),
            Frame::Bulk(Bytes::from(offset.to_string())),
            Frame::Bulk(Bytes::from(value)),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        run(cmd, store).unwrap()
    }

    #[test]
    fn grows_the_string() {
        let mut store = Keyspace::new();

        assert_eq!(setbit(&mut store, 7, "1"), Frame::Integer(0));
        assert_eq!(setbit(&mut store, 7, "0"), Frame::Integer(1));
        assert_eq!(setbit(&mut store, 17, "1"), Frame::Integer(0));

        assert_eq!(
            store.get_string(b"key1"),
            Ok(Some(&Bytes::from_static(&[0x00, 0x00, 0x40])))
        );
    }

    #[test]
    fn parse() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("SETBIT")),
            Frame::Bulk(Bytes::from("key1")),
            Frame::Bulk(Bytes::from("7")),
            Frame::Bulk(Bytes::from("1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        assert_eq!(
            cmd,
            Command::Setbit(Setbit {
                key: Bytes::from("key1"),
                offset: 7,
                value: true,
            })
        );
    }

    #[test]
    fn invalid_bit() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("SETBIT")),
            Frame::Bulk(Bytes::from("key1")),
            Frame::Bulk(Bytes::from("7")),
            Frame::Bulk(Bytes::from("2")),
        ]);
        let err = Command::try_from(frame).unwrap_err();

        assert_eq!(err.to_string(), "ERR bit is not an integer or out of range");
    }
}
