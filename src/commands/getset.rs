use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Atomically sets `key` to `value` and returns the old value stored at `key`. Any previous TTL is
/// discarded.
///
/// Ref: <https://redis.io/docs/latest/commands/getset/>
#[derive(Debug, PartialEq)]
pub struct Getset {
    pub key: Bytes,
    pub value: Bytes,
}

impl Executable for Getset {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let previous = ctx.get_string(&self.key)?.cloned();
        ctx.set(self.key, self.value);
        Ok(Frame::optional_bulk(previous))
    }
}

impl TryFrom<&mut CommandParser> for Getset {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let value = parser.next_bytes()?;
        Ok(Self { key, value })
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Duration;

    use crate::commands::{run, Command};
    use crate::store::{Keyspace, Ttl};

    use super::*;

    #[tokio::test]
    async fn replaces_and_returns_previous() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GETSET")),
            Frame::Bulk(Bytes::from("key1")),
            Frame::Bulk(Bytes::from("2")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Getset(Getset {
                key: Bytes::from("key1"),
                value: Bytes::from("2"),
            })
        );

        let mut store = Keyspace::new();
        store.set_with_ttl(
            Bytes::from("key1"),
            Bytes::from("1"),
            Duration::from_secs(10),
        );

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(res, Frame::Bulk(Bytes::from("1")));
        assert_eq!(store.get_string(b"key1"), Ok(Some(&Bytes::from("2"))));
        assert_eq!(store.ttl(b"key1"), Ttl::Infinite);
    }

    #[tokio::test]
    async fn missing_key() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GETSET")),
            Frame::Bulk(Bytes::from("key1")),
            Frame::Bulk(Bytes::from("2")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let mut store = Keyspace::new();

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(res, Frame::NullBulkString);
        assert!(store.exists(b"key1"));
    }
}
