use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Get the value of `key`. If the key does not exist the special value `nil` is returned. An error
/// is returned if the value stored at `key` is not a string.
///
/// Ref: <https://redis.io/docs/latest/commands/get/>
#[derive(Debug, PartialEq)]
pub struct Get {
    pub key: Bytes,
}

impl Executable for Get {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let value = ctx.get_string(&self.key)?.cloned();
        Ok(Frame::optional_bulk(value))
    }
}

impl TryFrom<&mut CommandParser> for Get {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{run, Command};
    use crate::store::{Keyspace, StoreError};
    use crate::value::List;

    #[test]
    fn existing_key() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GET")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        assert_eq!(
            cmd,
            Command::Get(Get {
                key: Bytes::from("key1")
            })
        );

        let mut store = Keyspace::new();
        store.set(Bytes::from("key1"), Bytes::from("1"));

        let result = run(cmd, &mut store).unwrap();

        assert_eq!(result, Frame::Bulk(Bytes::from("1")));
    }

    #[test]
    fn missing_key() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GET")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let mut store = Keyspace::new();

        let result = run(cmd, &mut store).unwrap();

        assert_eq!(result, Frame::NullBulkString);
    }

    #[test]
    fn wrong_type() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GET")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let mut store = Keyspace::new();
        store.set(Bytes::from("key1"), List::from(vec![Bytes::from("a")]));

        let err = run(cmd, &mut store).unwrap_err();
        let err = err.downcast_ref::<StoreError>().unwrap();

        assert_eq!(*err, StoreError::WrongType);
        assert_eq!(
            err.to_string(),
            "WRONGTYPE Operation against a key holding the wrong kind of value"
        );
    }
}
