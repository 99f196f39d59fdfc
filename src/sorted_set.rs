use bytes::Bytes;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use crate::utils::range::clamp_range;

/// A sorted set: unique members, each with a score. Iteration order is ascending score with ties
/// broken by the member bytes, which is the order every range command observes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedSet {
    scores: HashMap<Bytes, f64>,
    ordered: BTreeSet<(Score, Bytes)>,
}

/// Outcome of [`SortedSet::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    Added,
    Updated,
    Unchanged,
}

impl SortedSet {
    pub fn new() -> SortedSet {
        SortedSet::default()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn score(&self, member: &[u8]) -> Option<f64> {
        self.scores.get(member).copied()
    }

    pub fn insert(&mut self, member: Bytes, score: f64) -> Insert {
        // -0.0 and 0.0 are the same score.
        let score = if score == 0.0 { 0.0 } else { score };

        match self.scores.insert(member.clone(), score) {
            None => {
                self.ordered.insert((Score(score), member));
                Insert::Added
            }
            Some(previous) if previous == score => Insert::Unchanged,
            Some(previous) => {
                self.ordered.remove(&(Score(previous), member.clone()));
                self.ordered.insert((Score(score), member));
                Insert::Updated
            }
        }
    }

    pub fn remove(&mut self, member: &[u8]) -> bool {
        match self.scores.remove_entry(member) {
            Some((member, score)) => {
                self.ordered.remove(&(Score(score), member));
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Bytes, f64)> {
        self.ordered.iter().map(|(score, member)| (member, score.0))
    }

    /// Members between the `start` and `stop` ranks, both inclusive, following the list index
    /// rules. With `reverse` ranks count from the highest score.
    pub fn range_by_rank(&self, start: i64, stop: i64, reverse: bool) -> Vec<(Bytes, f64)> {
        let Some(range) = clamp_range(start, stop, self.len()) else {
            return vec![];
        };

        let skip = range.start;
        let take = range.len();
        if reverse {
            self.iter()
                .rev()
                .skip(skip)
                .take(take)
                .map(|(member, score)| (member.clone(), score))
                .collect()
        } else {
            self.iter()
                .skip(skip)
                .take(take)
                .map(|(member, score)| (member.clone(), score))
                .collect()
        }
    }

    pub fn range_by_score(&self, min: ScoreBound, max: ScoreBound) -> Vec<(Bytes, f64)> {
        self.iter()
            .skip_while(|(_, score)| !min.admits_from_below(*score))
            .take_while(|(_, score)| max.admits_from_above(*score))
            .map(|(member, score)| (member.clone(), score))
            .collect()
    }

    pub fn remove_range_by_rank(&mut self, start: i64, stop: i64) -> usize {
        let removed = self.range_by_rank(start, stop, false);
        for (member, _) in removed.iter() {
            self.remove(member);
        }
        removed.len()
    }

    pub fn remove_range_by_score(&mut self, min: ScoreBound, max: ScoreBound) -> usize {
        let removed = self.range_by_score(min, max);
        for (member, _) in removed.iter() {
            self.remove(member);
        }
        removed.len()
    }
}

/// An `f64` with a total order so it can key the ordered index. NaN never gets here: score
/// arguments are rejected at parse time when they are not numbers.
#[derive(Debug, Clone, Copy)]
struct Score(f64);

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// One end of a score interval as written in `ZRANGEBYSCORE` and `ZREMRANGEBYSCORE`: a number,
/// optionally prefixed with `(` to exclude it, or one of `-inf`, `+inf`, `inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBound {
    pub value: f64,
    pub exclusive: bool,
}

impl ScoreBound {
    pub fn inclusive(value: f64) -> ScoreBound {
        ScoreBound {
            value,
            exclusive: false,
        }
    }

    fn admits_from_below(&self, score: f64) -> bool {
        if self.exclusive {
            score > self.value
        } else {
            score >= self.value
        }
    }

    fn admits_from_above(&self, score: f64) -> bool {
        if self.exclusive {
            score < self.value
        } else {
            score <= self.value
        }
    }
}

impl FromStr for ScoreBound {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (exclusive, number) = match s.strip_prefix('(') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let value = parse_score(number).ok_or(())?;

        Ok(ScoreBound { value, exclusive })
    }
}

/// Parses a score the way the server accepts it: any float `f64` understands, including `inf`,
/// `+inf` and `-inf` in any case. NaN is rejected.
pub fn parse_score(s: &str) -> Option<f64> {
    let value = match s.to_ascii_lowercase().as_str() {
        "inf" | "+inf" => f64::INFINITY,
        "-inf" => f64::NEG_INFINITY,
        other => other.parse::<f64>().ok()?,
    };

    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Formats a score for a reply, using the shortest representation that round-trips.
pub fn format_score(score: f64) -> Bytes {
    if score.is_infinite() {
        let s = if score > 0.0 { "inf" } else { "-inf" };
        return Bytes::from_static(s.as_bytes());
    }

    Bytes::from(score.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(entries: Vec<(Bytes, f64)>) -> Vec<Bytes> {
        entries.into_iter().map(|(member, _)| member).collect()
    }

    fn set_of(entries: &[(&'static str, f64)]) -> SortedSet {
        let mut set = SortedSet::new();
        for (member, score) in entries {
            set.insert(Bytes::from_static(member.as_bytes()), *score);
        }
        set
    }

    #[test]
    fn orders_by_score_then_member() {
        let set = set_of(&[("c", 1.0), ("a", 2.0), ("b", 1.0), ("d", -1.5)]);

        assert_eq!(
            members(set.range_by_rank(0, -1, false)),
            vec!["d", "b", "c", "a"]
        );
        assert_eq!(
            members(set.range_by_rank(0, -1, true)),
            vec!["a", "c", "b", "d"]
        );
    }

    #[test]
    fn insert_reports_changes() {
        let mut set = SortedSet::new();

        assert_eq!(set.insert(Bytes::from("a"), 1.1), Insert::Added);
        assert_eq!(set.insert(Bytes::from("a"), 1.1), Insert::Unchanged);
        assert_eq!(set.insert(Bytes::from("a"), 1.2), Insert::Updated);
        assert_eq!(set.len(), 1);
        assert_eq!(set.score(b"a"), Some(1.2));
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn score_bounds() {
        let set = set_of(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);

        let min: ScoreBound = "(1".parse().unwrap();
        let max: ScoreBound = "+inf".parse().unwrap();
        assert_eq!(members(set.range_by_score(min, max)), vec!["b", "c"]);

        let min: ScoreBound = "-inf".parse().unwrap();
        let max: ScoreBound = "(3".parse().unwrap();
        assert_eq!(members(set.range_by_score(min, max)), vec!["a", "b"]);

        assert!("nope".parse::<ScoreBound>().is_err());
        assert!("(".parse::<ScoreBound>().is_err());
    }

    #[test]
    fn remove_ranges() {
        let mut set = set_of(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]);

        assert_eq!(set.remove_range_by_rank(-2, -1), 2);
        assert_eq!(members(set.range_by_rank(0, -1, false)), vec!["a", "b"]);

        assert_eq!(
            set.remove_range_by_score(ScoreBound::inclusive(0.0), ScoreBound::inclusive(1.0)),
            1
        );
        assert_eq!(members(set.range_by_rank(0, -1, false)), vec!["b"]);
    }

    #[test]
    fn formats_scores() {
        assert_eq!(format_score(1.0), Bytes::from("1"));
        assert_eq!(format_score(1.1), Bytes::from("1.1"));
        assert_eq!(format_score(-2.5), Bytes::from("-2.5"));
        assert_eq!(format_score(f64::INFINITY), Bytes::from("inf"));
        assert_eq!(format_score(f64::NEG_INFINITY), Bytes::from("-inf"));
    }
}
