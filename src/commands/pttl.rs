use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::store;
use crate::Error;

/// Like `TTL` this command returns the remaining time to live of a key that has an expire set,
/// with the sole difference that `TTL` returns the amount of remaining time in seconds while
/// `PTTL` returns it in milliseconds.
///
/// Ref: <https://redis.io/docs/latest/commands/pttl>
#[derive(Debug, PartialEq)]
pub struct Pttl {
    pub key: Bytes,
}

impl Executable for Pttl {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let ttl = match ctx.ttl(&self.key) {
            store::Ttl::Remaining(remaining) => remaining.as_millis() as i64,
            store::Ttl::Infinite => -1,
            store::Ttl::Absent => -2,
        };
        Ok(Frame::Integer(ttl))
    }
}

impl TryFrom<&mut CommandParser> for Pttl {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::{self, Duration};

    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    #[tokio::test]
    async fn remaining_milliseconds() {
        time::pause();

        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("PTTL")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Pttl(Pttl {
                key: Bytes::from("key1"),
            })
        );

        let mut store = Keyspace::new();
        store.set_with_ttl(
            Bytes::from("key1"),
            Bytes::from("1"),
            Duration::from_secs(2),
        );

        time::advance(Duration::from_millis(500)).await;

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(res, Frame::Integer(1500));
    }
}
