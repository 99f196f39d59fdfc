use bytes::Bytes;
use strum_macros::EnumString;

use crate::commands::executable::{Context, Executable};
use crate::commands::keys::matches;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::value::Set;
use crate::Error;

/// Iterates the members of the set stored at key.
///
/// The whole set is returned in a single pass: the reply cursor is always `0` and `COUNT` is
/// accepted but only validated.
///
/// Ref: <https://redis.io/docs/latest/commands/sscan/>
#[derive(Debug, PartialEq)]
pub struct Sscan {
    pub key: Bytes,
    pub cursor: u64,
    pub pattern: Option<String>,
    pub count: Option<u64>,
}

#[derive(Debug, PartialEq, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
enum ScanOption {
    Match,
    Count,
}

impl Executable for Sscan {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let members = match ctx.get_as::<Set>(&self.key)? {
            Some(set) => set
                .iter()
                .filter(|member| {
                    self.pattern
                        .as_ref()
                        .map_or(true, |pattern| matches(pattern, member))
                })
                .cloned()
                .collect(),
            None => vec![],
        };

        Ok(Frame::Array(vec![
            Frame::Bulk(Bytes::from("0")),
            Frame::bulk_array(members),
        ]))
    }
}

impl TryFrom<&mut CommandParser> for Sscan {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let cursor = parser.next_integer()?;
        let cursor = u64::try_from(cursor).map_err(|_| CommandParserError::InvalidCursor)?;

        let mut pattern = None;
        let mut count = None;

        while parser.has_next() {
            match parser.next_keyword::<ScanOption>()? {
                ScanOption::Match => pattern = Some(parser.next_string()?),
                ScanOption::Count => {
                    let n = parser.next_integer()?;
                    if n < 1 {
                        return Err(CommandParserError::Syntax.into());
                    }
                    count = Some(n as u64);
                }
            }
        }

        Ok(Self {
            key,
            cursor,
            pattern,
            count,
        })
    }
}
