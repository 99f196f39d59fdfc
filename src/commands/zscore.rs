use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::sorted_set::{format_score, SortedSet};
use crate::Error;

/// Returns the score of member in the sorted set at key. If member does not exist in the sorted
/// set, or key does not exist, nil is returned.
///
/// Ref: <https://redis.io/docs/latest/commands/zscore/>
#[derive(Debug, PartialEq)]
pub struct Zscore {
    pub key: Bytes,
    pub member: Bytes,
}

impl Executable for Zscore {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let score = ctx
            .get_as::<SortedSet>(&self.key)?
            .and_then(|set| set.score(&self.member));

        Ok(Frame::optional_bulk(score.map(format_score)))
    }
}

impl TryFrom<&mut CommandParser> for Zscore {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let member = parser.next_bytes()?;

        Ok(Self { key, member })
    }
}
