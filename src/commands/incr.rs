use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Increments the number stored at key by one. If the key does not exist, it is set to 0 before
/// performing the operation.
///
/// Ref: <https://redis.io/docs/latest/commands/incr/>
#[derive(Debug, PartialEq)]
pub struct Incr {
    pub key: Bytes,
}

impl Executable for Incr {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let value = ctx.incr_by(&self.key, 1i64)?;
        Ok(Frame::Integer(value))
    }
}

impl TryFrom<&mut CommandParser> for Incr {
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

    #[test]
    fn existing_key() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("INCR")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        assert_eq!(
            cmd,
            Command::Incr(Incr {
                key: Bytes::from("key1")
            })
        );

        let mut store = Keyspace::new();
        store.set(Bytes::from("key1"), Bytes::from("1"));

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(res, Frame::Integer(2));
        assert_eq!(store.get_string(b"key1"), Ok(Some(&Bytes::from("2"))));
    }

    #[test]
    fn non_existing_key() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("INCR")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let mut store = Keyspace::new();

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(res, Frame::Integer(1));
    }

    #[test]
    fn invalid_value() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("INCR")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let mut store = Keyspace::new();
        store.set(Bytes::from("key1"), Bytes::from("value"));

        let err = run(cmd, &mut store).unwrap_err();
        let err = err.downcast_ref::<StoreError>().unwrap();

        assert_eq!(*err, StoreError::NotAnInteger);
        assert_eq!(err.to_string(), "ERR value is not an integer or out of range");
    }
}
