use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::zrange::{parse_rank_range, rank_range};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Returns the specified range of elements in the sorted set stored at key, ordered from the
/// highest to the lowest score. Descending lexicographical order is used for elements with equal
/// score.
///
/// Ref: <https://redis.io/docs/latest/commands/zrevrange/>
#[derive(Debug, PartialEq)]
pub struct Zrevrange {
    pub key: Bytes,
    pub start: i64,
    pub stop: i64,
    pub with_scores: bool,
}

impl Executable for Zrevrange {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        rank_range(ctx, &self.key, self.start, self.stop, self.with_scores, true)
    }
}

impl TryFrom<&mut CommandParser> for Zrevrange {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let (key, start, stop, with_scores) = parse_rank_range(parser)?;

        Ok(Self {
            key,
            start,
            stop,
            with_scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::sorted_set::SortedSet;
    use crate::store::Keyspace;

    use super::*;

    #[test]
    fn highest_first() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("ZREVRANGE")),
            Frame::Bulk(Bytes::from("myzset")),
            Frame::Bulk(Bytes::from("0")),
            Frame::Bulk(Bytes::from("1")),
            Frame::Bulk(Bytes::from("WITHSCORES")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Zrevrange(Zrevrange {
                key: Bytes::from("myzset"),
                start: 0,
                stop: 1,
                with_scores: true,
            })
        );

        let mut set = SortedSet::new();
        set.insert(Bytes::from("a"), 1.0);
        set.insert(Bytes::from("b"), 2.0);
        set.insert(Bytes::from("c"), 2.0);
        let mut store = Keyspace::new();
        store.set(Bytes::from("myzset"), set);

        assert_eq!(
            run(cmd, &mut store).unwrap(),
            Frame::bulk_array([
                Bytes::from("c"),
                Bytes::from("2"),
                Bytes::from("b"),
                Bytes::from("2")
            ])
        );
    }
}
