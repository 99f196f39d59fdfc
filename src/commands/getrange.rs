use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::utils::range::byte_range;
use crate::Error;

/// Returns the substring of the string value stored at key, determined by the offsets start and
/// end (both are inclusive). Negative offsets can be used in order to provide an offset starting
/// from the end of the string. So -1 means the last character, -2 the penultimate and so forth.
/// The function handles out of range requests by limiting the resulting range to the actual length
/// of the string.
///
/// Ref: <https://redis.io/docs/latest/commands/getrange/>
#[derive(Debug, PartialEq)]
pub struct Getrange {
    pub key: Bytes,
    pub start: i64,
    pub end: i64,
}

impl Executable for Getrange {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let Some(value) = ctx.get_string(&self.key)? else {
            return Ok(Frame::Bulk(Bytes::new()));
        };

        let res = match byte_range(self.start, self.end, value.len()) {
            Some(range) => value.slice(range),
            None => Bytes::new(),
        };

        Ok(Frame::Bulk(res))
    }
}

impl TryFrom<&mut CommandParser> for Getrange {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let start = parser.next_integer()?;
        let end = parser.next_integer()?;

        Ok(Self { key, start, end })
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    fn getrange(store: &mut Keyspace, start: i64, end: i64) -> Frame {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GETRANGE")),
            Frame::Bulk(Bytes::from("mykey")),
            Frame::Bulk(Bytes::from(start.to_string())),
            Frame::Bulk(Bytes::from(end.to_string())),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Getrange(Getrange {
                key: Bytes::from("mykey"),
                start,
                end,
            })
        );
        run(cmd, store).unwrap()
    }

    #[test]
    fn ranges() {
        let mut store = Keyspace::new();
        store.set(Bytes::from("mykey"), Bytes::from("This is a string"));

        assert_eq!(getrange(&mut store, 0, 3), Frame::Bulk(Bytes::from("This")));
        assert_eq!(getrange(&mut store, -3, -1), Frame::Bulk(Bytes::from("ing")));
        assert_eq!(
            getrange(&mut store, 0, -1),
            Frame::Bulk(Bytes::from("This is a string"))
        );
        assert_eq!(
            getrange(&mut store, 10, 100),
            Frame::Bulk(Bytes::from("string"))
        );
        assert_eq!(getrange(&mut store, 100, 200), Frame::Bulk(Bytes::new()));
        assert_eq!(getrange(&mut store, 5, 2), Frame::Bulk(Bytes::new()));
    }

    #[test]
    fn missing_key() {
        let mut store = Keyspace::new();

        assert_eq!(getrange(&mut store, 0, -1), Frame::Bulk(Bytes::new()));
    }
}
