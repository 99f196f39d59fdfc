use bytes::Bytes;
use strum_macros::EnumString;

use crate::commands::executable::{Context, Executable};
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::sorted_set::{Insert, SortedSet};
use crate::Error;

/// Adds all the specified members with the specified scores to the sorted set stored at key. If a
/// specified member is already a member of the sorted set, the score is updated and the element
/// reinserted at the right position to ensure the correct ordering.
///
/// Options:
/// * XX: Only update elements that already exist. Don't add new elements.
/// * NX: Only add new elements. Don't update already existing elements.
/// * CH: Modify the return value from the number of new elements added, to the total number of
///   elements changed.
///
/// Ref: <https://redis.io/docs/latest/commands/zadd/>
#[derive(Debug, PartialEq)]
pub struct Zadd {
    pub key: Bytes,
    pub condition: Option<ZaddCondition>,
    pub changed: bool,
    pub members: Vec<(f64, Bytes)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZaddCondition {
    NotExists,
    Exists,
}

#[derive(Debug, PartialEq, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
enum ZaddOption {
    Nx,
    Xx,
    Ch,
    Incr,
}

impl Executable for Zadd {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let condition = self.condition;
        let counted = ctx.upsert(&self.key, |set: &mut SortedSet| {
            let mut added = 0;
            let mut updated = 0;

            for (score, member) in self.members {
                let exists = set.score(&member).is_some();
                match condition {
                    Some(ZaddCondition::NotExists) if exists => continue,
                    Some(ZaddCondition::Exists) if !exists => continue,
                    _ => {}
                }

                match set.insert(member, score) {
                    Insert::Added => added += 1,
                    Insert::Updated => updated += 1,
                    Insert::Unchanged => {}
                }
            }

            if self.changed {
                added + updated
            } else {
                added
            }
        })?;

        Ok(Frame::Integer(counted))
    }
}

impl TryFrom<&mut CommandParser> for Zadd {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;

        let mut not_exists = false;
        let mut exists = false;
        let mut changed = false;

        while let Some(option) = parser.next_if_keyword::<ZaddOption>() {
            match option {
                ZaddOption::Nx => not_exists = true,
                ZaddOption::Xx => exists = true,
                ZaddOption::Ch => changed = true,
                ZaddOption::Incr => return Err(CommandParserError::IncrNotSupported.into()),
            }
        }

        let condition = match (not_exists, exists) {
            (true, true) => return Err(CommandParserError::Syntax.into()),
            (true, false) => Some(ZaddCondition::NotExists),
            (false, true) => Some(ZaddCondition::Exists),
            (false, false) => None,
        };

        let mut members = vec![];
        loop {
            let score = parser.next_float()?;
            let member = parser.next_bytes()?;
            members.push((score, member));

            if !parser.has_next() {
                break;
            }
        }

        Ok(Self {
            key,
            condition,
            changed,
            members,
        })
    }
}
