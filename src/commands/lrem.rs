use bytes::Bytes;
use std::collections::HashSet;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::List;
use crate::Error;

/// Removes the first `count` occurrences of elements equal to `element` from the list stored at
/// key:
///
/// * `count > 0`: Remove elements equal to element moving from head to tail.
/// * `count < 0`: Remove elements equal to element moving from tail to head.
/// * `count = 0`: Remove all elements equal to element.
///
/// Ref: <https://redis.io/docs/latest/commands/lrem/>
#[derive(Debug, PartialEq)]
pub struct Lrem {
    pub key: Bytes,
    pub count: i64,
    pub element: Bytes,
}

impl Executable for Lrem {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let removed = ctx.update(&self.key, |list: &mut List| {
            let limit = match self.count {
                0 => usize::MAX,
                count => count.unsigned_abs() as usize,
            };

            let matches: HashSet<usize> = if self.count < 0 {
                (0..list.len())
                    .rev()
                    .filter(|i| list[*i] == self.element)
                    .take(limit)
                    .collect()
            } else {
                (0..list.len())
                    .filter(|i| list[*i] == self.element)
                    .take(limit)
                    .collect()
            };

            let mut index = 0;
            list.retain(|_| {
                let keep = !matches.contains(&index);
                index += 1;
                keep
            });

            matches.len()
        })?;

        Ok(Frame::Integer(removed.unwrap_or(0) as i64))
    }
}

impl TryFrom<&mut CommandParser> for Lrem {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let count = parser.next_integer()?;
        let element = parser.next_bytes()?;

        Ok(Self {
            key,
            count,
            element,
        })
    }
}
