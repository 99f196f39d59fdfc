use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::sorted_set::SortedSet;
use crate::Error;

/// Removes all elements in the sorted set stored at key with rank between start and stop. Both
/// start and stop are 0-based indexes and can be negative, counting from the highest score.
///
/// Ref: <https://redis.io/docs/latest/commands/zremrangebyrank/>
#[derive(Debug, PartialEq)]
pub struct Zremrangebyrank {
    pub key: Bytes,
    pub start: i64,
    pub stop: i64,
}

impl Executable for Zremrangebyrank {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let removed = ctx.update(&self.key, |set: &mut SortedSet| {
            set.remove_range_by_rank(self.start, self.stop)
        })?;

        Ok(Frame::Integer(removed.unwrap_or(0) as i64))
    }
}

impl TryFrom<&mut CommandParser> for Zremrangebyrank {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let start = parser.next_integer()?;
        let stop = parser.next_integer()?;

        Ok(Self { key, start, stop })
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    #[test]
    fn removes_ranks() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("ZREMRANGEBYRANK")),
            Frame::Bulk(Bytes::from("myzset")),
            Frame::Bulk(Bytes::from("0")),
            Frame::Bulk(Bytes::from("1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Zremrangebyrank(Zremrangebyrank {
                key: Bytes::from("myzset"),
                start: 0,
                stop: 1,
            })
        );

        let mut set = SortedSet::new();
        set.insert(Bytes::from("one"), 1.0);
        set.insert(Bytes::from("two"), 2.0);
        let mut store = Keyspace::new();
        store.set(Bytes::from("myzset"), set);

        assert_eq!(run(cmd, &mut store).unwrap(), Frame::Integer(2));
        assert!(!store.exists(b"myzset"));
    }
}
