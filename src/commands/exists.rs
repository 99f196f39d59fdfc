use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Returns how many of the given keys exist. A key mentioned multiple times is counted multiple
/// times.
///
/// Ref: <https://redis.io/docs/latest/commands/exists/>
#[derive(Debug, PartialEq)]
pub struct Exists {
    pub keys: Vec<Bytes>,
}

impl Executable for Exists {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let count = self.keys.iter().filter(|key| ctx.exists(key)).count();
        Ok(Frame::Integer(count as i64))
    }
}

impl TryFrom<&mut CommandParser> for Exists {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.remaining_bytes()?;
        Ok(Self { keys })
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    #[test]
    fn duplicates_count_twice() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("EXISTS")),
            Frame::Bulk(Bytes::from("foo")),
            Frame::Bulk(Bytes::from("foo")),
            Frame::Bulk(Bytes::from("nope")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Exists(Exists {
                keys: vec![Bytes::from("foo"), Bytes::from("foo"), Bytes::from("nope")]
            })
        );

        let mut store = Keyspace::new();
        store.set(Bytes::from("foo"), Bytes::from("1"));

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(res, Frame::Integer(2));
    }
}
