use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Return the number of keys in the currently-selected database. Keys whose TTL has passed are
/// not counted even when nothing has evicted them yet.
///
/// Ref: <https://redis.io/docs/latest/commands/dbsize/>
#[derive(Debug, PartialEq)]
pub struct DBSize;

impl Executable for DBSize {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        Ok(Frame::Integer(ctx.size() as i64))
    }
}

impl TryFrom<&mut CommandParser> for DBSize {
    type Error = Error;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use tokio::time::{self, Duration};

    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    #[tokio::test]
    async fn skips_expired_keys() {
        time::pause();

        let frame = Frame::Array(vec![Frame::Bulk(Bytes::from("DBSIZE"))]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(cmd, Command::DBsize(DBSize));

        let mut store = Keyspace::new();
        store.set(Bytes::from("key1"), Bytes::from("1"));
        store.set_with_ttl(
            Bytes::from("key2"),
            Bytes::from("2"),
            Duration::from_secs(1),
        );

        time::advance(Duration::from_secs(1)).await;

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(res, Frame::Integer(1));
    }
}
