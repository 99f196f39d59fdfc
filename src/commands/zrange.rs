use bytes::Bytes;
use strum_macros::EnumString;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::sorted_set::{format_score, SortedSet};
use crate::Error;

/// Returns the specified range of elements in the sorted set stored at key, ordered from the
/// lowest to the highest score. Elements with the same score are ordered lexicographically.
///
/// Only the index form is supported: start and stop are zero-based ranks, negative ones counting
/// from the highest score.
///
/// Ref: <https://redis.io/docs/latest/commands/zrange/>
#[derive(Debug, PartialEq)]
pub struct Zrange {
    pub key: Bytes,
    pub start: i64,
    pub stop: i64,
    pub with_scores: bool,
}

#[derive(Debug, PartialEq, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
enum RangeOption {
    Withscores,
}

impl Executable for Zrange {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        rank_range(ctx, &self.key, self.start, self.stop, self.with_scores, false)
    }
}

impl TryFrom<&mut CommandParser> for Zrange {
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

pub(super) fn parse_rank_range(
    parser: &mut CommandParser,
) -> Result<(Bytes, i64, i64, bool), Error> {
    let key = parser.next_bytes()?;
    let start = parser.next_integer()?;
    let stop = parser.next_integer()?;
    let with_scores = parse_with_scores(parser)?;

    Ok((key, start, stop, with_scores))
}

pub(super) fn parse_with_scores(parser: &mut CommandParser) -> Result<bool, Error> {
    if !parser.has_next() {
        return Ok(false);
    }

    match parser.next_keyword::<RangeOption>()? {
        RangeOption::Withscores => Ok(true),
    }
}

pub(super) fn rank_range(
    ctx: &mut Context,
    key: &[u8],
    start: i64,
    stop: i64,
    with_scores: bool,
    reverse: bool,
) -> Result<Frame, Error> {
    let entries = match ctx.get_as::<SortedSet>(key)? {
        Some(set) => set.range_by_rank(start, stop, reverse),
        None => vec![],
    };

    Ok(scored_reply(entries, with_scores))
}

/// Members as a flat array, each followed by its score when `with_scores` is set.
pub(crate) fn scored_reply(entries: Vec<(Bytes, f64)>, with_scores: bool) -> Frame {
    let mut frames = Vec::with_capacity(entries.len() * if with_scores { 2 } else { 1 });

    for (member, score) in entries {
        frames.push(Frame::Bulk(member));
        if with_scores {
            frames.push(Frame::Bulk(format_score(score)));
        }
    }

    Frame::Array(frames)
}
