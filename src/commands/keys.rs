use bytes::Bytes;
use glob_match::glob_match;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Returns all keys matching `pattern`.
///
/// Ref: <https://redis.io/docs/latest/commands/keys/>
#[derive(Debug, PartialEq)]
pub struct Keys {
    pub pattern: String,
}

impl Executable for Keys {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let keys = ctx
            .keys()
            .filter(|key| matches(&self.pattern, key))
            .cloned()
            .collect::<Vec<_>>();

        Ok(Frame::bulk_array(keys))
    }
}

impl TryFrom<&mut CommandParser> for Keys {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let pattern = parser.next_string()?;
        Ok(Self { pattern })
    }
}

/// Glob match of a binary key against `pattern`, shared with `SSCAN`. Invalid UTF-8 sequences
/// in the key stand in as replacement characters, so `*` still matches any key.
pub(crate) fn matches(pattern: &str, key: &Bytes) -> bool {
    glob_match(pattern, &String::from_utf8_lossy(key))
}
