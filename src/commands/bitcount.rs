use bytes::Bytes;
use strum_macros::EnumString;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::utils::range::byte_range;
use crate::Error;

/// Count the number of set bits (population counting) in a string. By default all the bytes
/// contained in the string are examined. The interval to count in can be given as `start` and
/// `end`, as byte offsets or, with `BIT`, as bit offsets.
///
/// Ref: <https://redis.io/docs/latest/commands/bitcount/>
#[derive(Debug, PartialEq)]
pub struct Bitcount {
    pub key: Bytes,
    pub range: Option<BitRange>,
}

#[derive(Debug, PartialEq)]
pub struct BitRange {
    pub start: i64,
    pub end: i64,
    pub unit: Unit,
}

#[derive(Debug, PartialEq, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum Unit {
    Byte,
    Bit,
}

impl Executable for Bitcount {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let Some(value) = ctx.get_string(&self.key)? else {
            return Ok(Frame::Integer(0));
        };

        let count = match self.range {
            None => count_ones(value),
            Some(BitRange {
                start,
                end,
                unit: Unit::Byte,
            }) => byte_range(start, end, value.len()).map_or(0, |range| count_ones(&value[range])),
            Some(BitRange {
                start,
                end,
                unit: Unit::Bit,
            }) => byte_range(start, end, value.len() * 8).map_or(0, |range| {
                range
                    .filter(|bit| value[bit / 8] & (1 << (7 - bit % 8)) != 0)
                    .count()
            }),
        };

        Ok(Frame::Integer(count as i64))
    }
}

fn count_ones(bytes: &[u8]) -> usize {
    bytes.iter().map(|byte| byte.count_ones() as usize).sum()
}

impl TryFrom<&mut CommandParser> for Bitcount {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;

        if !parser.has_next() {
            return Ok(Self { key, range: None });
        }

        let start = parser.next_integer()?;
        let end = parser.next_integer()?;
        let unit = if parser.has_next() {
            parser.next_keyword::<Unit>()?
        } else {
            Unit::Byte
        };

        Ok(Self {
            key,
            range: Some(BitRange { start, end, unit }),
        })
    }
}
