use bytes::Bytes;
use strum_macros::EnumString;

use crate::commands::executable::{Context, Executable};
use crate::commands::zrange::scored_reply;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::sorted_set::{ScoreBound, SortedSet};
use crate::Error;

/// Returns all the elements in the sorted set at key with a score between min and max (including
/// elements with score equal to min or max). The elements are considered to be ordered from low
/// to high scores.
///
/// min and max can be -inf and +inf, and prefixing a score with `(` makes that end exclusive.
///
/// Ref: <https://redis.io/docs/latest/commands/zrangebyscore/>
#[derive(Debug, PartialEq)]
pub struct Zrangebyscore {
    pub key: Bytes,
    pub min: ScoreBound,
    pub max: ScoreBound,
    pub with_scores: bool,
    pub limit: Option<Limit>,
}

/// `LIMIT offset count`. A negative count returns every element from offset on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limit {
    pub offset: i64,
    pub count: i64,
}

#[derive(Debug, PartialEq, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
enum RangeByScoreOption {
    Withscores,
    Limit,
}

impl Executable for Zrangebyscore {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let mut entries = match ctx.get_as::<SortedSet>(&self.key)? {
            Some(set) => set.range_by_score(self.min, self.max),
            None => vec![],
        };

        if let Some(Limit { offset, count }) = self.limit {
            if offset < 0 {
                entries.clear();
            } else {
                let count = usize::try_from(count).unwrap_or(usize::MAX);
                entries = entries
                    .into_iter()
                    .skip(offset as usize)
                    .take(count)
                    .collect();
            }
        }

        Ok(scored_reply(entries, self.with_scores))
    }
}

impl TryFrom<&mut CommandParser> for Zrangebyscore {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let (min, max) = parse_score_range(parser)?;

        let mut with_scores = false;
        let mut limit = None;

        while parser.has_next() {
            match parser.next_keyword::<RangeByScoreOption>()? {
                RangeByScoreOption::Withscores => with_scores = true,
                RangeByScoreOption::Limit => {
                    let offset = parser.next_integer()?;
                    let count = parser.next_integer()?;
                    limit = Some(Limit { offset, count });
                }
            }
        }

        Ok(Self {
            key,
            min,
            max,
            with_scores,
            limit,
        })
    }
}

pub(super) fn parse_score_range(
    parser: &mut CommandParser,
) -> Result<(ScoreBound, ScoreBound), Error> {
    let min = parser
        .next_string()?
        .parse::<ScoreBound>()
        .map_err(|_| CommandParserError::InvalidScoreRange)?;
    let max = parser
        .next_string()?
        .parse::<ScoreBound>()
        .map_err(|_| CommandParserError::InvalidScoreRange)?;

    Ok((min, max))
}
