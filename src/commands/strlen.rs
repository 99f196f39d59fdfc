use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Returns the length of the string value stored at key. An error is returned when key holds a
/// non-string value.
///
/// Ref: <https://redis.io/docs/latest/commands/strlen/>
#[derive(Debug, PartialEq)]
pub struct Strlen {
    pub key: Bytes,
}

impl Executable for Strlen {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let len = ctx.get_string(&self.key)?.map_or(0, |value| value.len());
        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Strlen {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    #[test]
    fn existing_and_missing_key() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("STRLEN")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Strlen(Strlen {
                key: Bytes::from("key1")
            })
        );

        let mut store = Keyspace::new();
        store.set(Bytes::from("key1"), Bytes::from("Hello world"));

        let res = run(cmd, &mut store).unwrap();
        assert_eq!(res, Frame::Integer(11));

        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("STRLEN")),
            Frame::Bulk(Bytes::from("key2")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let res = run(cmd, &mut store).unwrap();
        assert_eq!(res, Frame::Integer(0));
    }
}
