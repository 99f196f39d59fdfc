use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::value::Hash;
use crate::Error;

/// Sets the specified fields to their respective values in the hash stored at key. This command
/// overwrites the values of specified fields that exist in the hash. If key doesn't exist, a new
/// key holding a hash is created. Replies the number of fields that were added.
///
/// Ref: <https://redis.io/docs/latest/commands/hset/>
#[derive(Debug, PartialEq)]
pub struct Hset {
    pub key: Bytes,
    pub fields: Vec<(Bytes, Bytes)>,
}

impl Executable for Hset {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let added = insert_fields(ctx, &self.key, self.fields)?;
        Ok(Frame::Integer(added as i64))
    }
}

impl TryFrom<&mut CommandParser> for Hset {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let fields = parser.remaining_pairs()?;

        Ok(Self { key, fields })
    }
}

/// Writes every field and returns how many of them were new.
pub(super) fn insert_fields(
    ctx: &mut Context,
    key: &Bytes,
    fields: Vec<(Bytes, Bytes)>,
) -> Result<usize, Error> {
    let added = ctx.upsert(key, |hash: &mut Hash| {
        fields
            .into_iter()
            .filter(|(field, value)| hash.insert(field.clone(), value.clone()).is_none())
            .count()
    })?;

    Ok(added)
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    #[test]
    fn counts_new_fields() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("HSET")),
            Frame::Bulk(Bytes::from("myhash")),
            Frame::Bulk(Bytes::from("f1")),
            Frame::Bulk(Bytes::from("v1")),
            Frame::Bulk(Bytes::from("f2")),
            Frame::Bulk(Bytes::from("v2")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Hset(Hset {
                key: Bytes::from("myhash"),
                fields: vec![
                    (Bytes::from("f1"), Bytes::from("v1")),
                    (Bytes::from("f2"), Bytes::from("v2")),
                ],
            })
        );

        let mut store = Keyspace::new();
        store.set(
            Bytes::from("myhash"),
            Hash::from([(Bytes::from("f1"), Bytes::from("old"))]),
        );

        assert_eq!(run(cmd, &mut store).unwrap(), Frame::Integer(1));

        let hash = store.get_as::<Hash>(b"myhash").unwrap().unwrap();
        assert_eq!(hash.get(&Bytes::from("f1")), Some(&Bytes::from("v1")));
        assert_eq!(hash.len(), 2);
    }

    #[test]
    fn odd_arguments() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("HSET")),
            Frame::Bulk(Bytes::from("myhash")),
            Frame::Bulk(Bytes::from("f1")),
        ]);
        let err = Command::try_from(frame).unwrap_err();

        assert_eq!(
            err.to_string(),
            "ERR wrong number of arguments for 'hset' command"
        );
    }
}
