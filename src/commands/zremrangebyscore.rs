use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::zrangebyscore::parse_score_range;
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::sorted_set::{ScoreBound, SortedSet};
use crate::Error;

/// Removes all elements in the sorted set stored at key with a score between min and max
/// (inclusive, unless prefixed with `(`).
///
/// Ref: <https://redis.io/docs/latest/commands/zremrangebyscore/>
#[derive(Debug, PartialEq)]
pub struct Zremrangebyscore {
    pub key: Bytes,
    pub min: ScoreBound,
    pub max: ScoreBound,
}

impl Executable for Zremrangebyscore {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let removed = ctx.update(&self.key, |set: &mut SortedSet| {
            set.remove_range_by_score(self.min, self.max)
        })?;

        Ok(Frame::Integer(removed.unwrap_or(0) as i64))
    }
}

impl TryFrom<&mut CommandParser> for Zremrangebyscore {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let (min, max) = parse_score_range(parser)?;

        Ok(Self { key, min, max })
    }
}
