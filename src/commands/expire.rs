use bytes::Bytes;
use tokio::time::Duration;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::store::Keyspace;
use crate::Error;

/// Set a timeout on `key`, in seconds. After the timeout has expired, the key will automatically
/// be deleted. A timeout that is not positive deletes the key right away.
///
/// Ref: <https://redis.io/docs/latest/commands/expire/>
#[derive(Debug, PartialEq)]
pub struct Expire {
    pub key: Bytes,
    pub seconds: i64,
}

impl Executable for Expire {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let millis = self.seconds.saturating_mul(1000);
        Ok(expire_in(ctx, &self.key, millis))
    }
}

impl TryFrom<&mut CommandParser> for Expire {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let seconds = parser.next_integer()?;
        Ok(Self { key, seconds })
    }
}

/// Shared by `EXPIRE` and `PEXPIRE`. Replies 1 when the key existed, 0 otherwise.
pub(crate) fn expire_in(store: &mut Keyspace, key: &[u8], millis: i64) -> Frame {
    let applied = if millis <= 0 {
        store.remove(key).is_some()
    } else {
        store.expire(key, Duration::from_millis(millis as u64))
    };

    Frame::Integer(applied as i64)
}
