use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Decrements the number stored at key by one. If the key does not exist, it is set to 0 before
/// performing the operation.
///
/// Ref: <https://redis.io/docs/latest/commands/decr/>
#[derive(Debug, PartialEq)]
pub struct Decr {
    pub key: Bytes,
}

impl Executable for Decr {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let value = ctx.incr_by(&self.key, -1i64)?;
        Ok(Frame::Integer(value))
    }
}

impl TryFrom<&mut CommandParser> for Decr {
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
    use crate::store::Keyspace;

    #[test]
    fn existing_and_missing_key() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("DECR")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        assert_eq!(
            cmd,
            Command::Decr(Decr {
                key: Bytes::from("key1")
            })
        );

        let mut store = Keyspace::new();
        store.set(Bytes::from("key1"), Bytes::from("10"));

        let res = run(cmd, &mut store).unwrap();
        assert_eq!(res, Frame::Integer(9));

        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("DECR")),
            Frame::Bulk(Bytes::from("key2")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let res = run(cmd, &mut store).unwrap();
        assert_eq!(res, Frame::Integer(-1));
    }
}
