use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::Set;
use crate::Error;

/// Remove the specified members from the set stored at key. Replies the number of members that
/// were removed. The key is deleted when the set is left empty.
///
/// Ref: <https://redis.io/docs/latest/commands/srem/>
#[derive(Debug, PartialEq)]
pub struct Srem {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl Executable for Srem {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let removed = ctx.update(&self.key, |set: &mut Set| {
            self.members
                .iter()
                .filter(|member| set.remove(*member))
                .count()
        })?;

        Ok(Frame::Integer(removed.unwrap_or(0) as i64))
    }
}

impl TryFrom<&mut CommandParser> for Srem {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let members = parser.remaining_bytes()?;

        Ok(Self { key, members })
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    #[test]
    fn removes_and_deletes_empty_set() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("SREM")),
            Frame::Bulk(Bytes::from("myset")),
            Frame::Bulk(Bytes::from("a")),
            Frame::Bulk(Bytes::from("c")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Srem(Srem {
                key: Bytes::from("myset"),
                members: vec![Bytes::from("a"), Bytes::from("c")],
            })
        );

        let mut store = Keyspace::new();
        store.set(Bytes::from("myset"), Set::from([Bytes::from("a")]));

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(res, Frame::Integer(1));
        assert!(!store.exists(b"myset"));
    }
}
