use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::Set;
use crate::Error;

/// Returns if member is a member of the set stored at key.
///
/// Ref: <https://redis.io/docs/latest/commands/sismember/>
#[derive(Debug, PartialEq)]
pub struct Sismember {
    pub key: Bytes,
    pub member: Bytes,
}

impl Executable for Sismember {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let found = ctx
            .get_as::<Set>(&self.key)?
            .is_some_and(|set| set.contains(&self.member));

        Ok(Frame::Integer(found as i64))
    }
}

impl TryFrom<&mut CommandParser> for Sismember {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let member = parser.next_bytes()?;

        Ok(Self { key, member })
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    #[test]
    fn membership() {
        let mut store = Keyspace::new();
        store.set(Bytes::from("myset"), Set::from([Bytes::from("a")]));

        for (member, expected) in [("a", 1), ("b", 0)] {
            let frame = Frame::Array(vec![
                Frame::Bulk(Bytes::from("SISMEMBER")),
                Frame::Bulk(Bytes::from("myset")),
                Frame::Bulk(Bytes::from(member)),
            ]);
            let cmd = Command::try_from(frame).unwrap();

            assert_eq!(run(cmd, &mut store).unwrap(), Frame::Integer(expected));
        }
    }
}
