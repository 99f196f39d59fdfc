use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::Set;
use crate::Error;

/// Add the specified members to the set stored at key. Specified members that are already a member
/// of this set are ignored. Replies the number of members that were added.
///
/// Ref: <https://redis.io/docs/latest/commands/sadd/>
#[derive(Debug, PartialEq)]
pub struct Sadd {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl Executable for Sadd {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let added = ctx.upsert(&self.key, |set: &mut Set| {
            self.members
                .into_iter()
                .filter(|member| set.insert(member.clone()))
                .count()
        })?;

        Ok(Frame::Integer(added as i64))
    }
}

impl TryFrom<&mut CommandParser> for Sadd {
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
    fn counts_new_members() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("SADD")),
            Frame::Bulk(Bytes::from("myset")),
            Frame::Bulk(Bytes::from("a")),
            Frame::Bulk(Bytes::from("b")),
            Frame::Bulk(Bytes::from("a")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Sadd(Sadd {
                key: Bytes::from("myset"),
                members: vec![Bytes::from("a"), Bytes::from("b"), Bytes::from("a")],
            })
        );

        let mut store = Keyspace::new();
        store.set(Bytes::from("myset"), Set::from([Bytes::from("b")]));

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(res, Frame::Integer(1));
        assert_eq!(
            store.get_as::<Set>(b"myset"),
            Ok(Some(&Set::from([Bytes::from("a"), Bytes::from("b")])))
        );
    }
}
