use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::Error;

/// Returns the string representation of the type of the value stored at `key`.
///
/// The different types that can be returned are: `string`, `list`, `set`, `zset` and `hash`.
/// If the key does not exist, `none` is returned.
///
/// Ref: <https://redis.io/docs/latest/commands/type/>
#[derive(Debug, PartialEq)]
pub struct Type {
    pub key: Bytes,
}

impl Executable for Type {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let type_ = ctx
            .get(&self.key)
            .map(|value| value.value_type().to_string())
            .unwrap_or_else(|| "none".to_string());

        Ok(Frame::Simple(type_))
    }
}

impl TryFrom<&mut CommandParser> for Type {
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
    use crate::value::{Hash, List};

    use super::*;

    fn type_of(store: &mut Keyspace, key: &str) -> Frame {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("TYPE")),
            Frame::Bulk(Bytes::from(key.to_string())),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        run(cmd, store).unwrap()
    }

    #[test]
    fn existing_keys() {
        let mut store = Keyspace::new();

        store.set(Bytes::from("key1"), Bytes::from("1"));
        store.set(Bytes::from("key2"), List::from(vec![Bytes::from("a")]));
        store.set(
            Bytes::from("key3"),
            Hash::from([(Bytes::from("f"), Bytes::from("v"))]),
        );

        assert_eq!(type_of(&mut store, "key1"), Frame::Simple("string".to_string()));
        assert_eq!(type_of(&mut store, "key2"), Frame::Simple("list".to_string()));
        assert_eq!(type_of(&mut store, "key3"), Frame::Simple("hash".to_string()));
    }

    #[test]
    fn missing_key() {
        let mut store = Keyspace::new();

        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("TYPE")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        assert_eq!(
            cmd,
            Command::Type(Type {
                key: Bytes::from("key1"),
            })
        );

        let result = run(cmd, &mut store).unwrap();

        assert_eq!(result, Frame::Simple("none".to_string()));
    }
}
