use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::value::List;
use crate::Error;

/// Removes and returns the first elements of the list stored at key. Without `count` a single
/// element is replied, otherwise an array of up to `count` elements. The key is deleted once the
/// list is empty.
///
/// Ref: <https://redis.io/docs/latest/commands/lpop/>
#[derive(Debug, PartialEq)]
pub struct Lpop {
    pub key: Bytes,
    pub count: Option<usize>,
}

impl Executable for Lpop {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let popped = ctx.update(&self.key, |list: &mut List| {
            let count = self.count.unwrap_or(1).min(list.len());
            list.drain(..count).collect::<Vec<_>>()
        })?;

        Ok(pop_reply(popped, self.count.is_some()))
    }
}

impl TryFrom<&mut CommandParser> for Lpop {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let count = parse_count(parser)?;

        Ok(Self { key, count })
    }
}

/// The optional `count` argument of `LPOP` and `RPOP`.
pub(super) fn parse_count(parser: &mut CommandParser) -> Result<Option<usize>, Error> {
    match parser.next_integer() {
        Ok(count) if count >= 0 => Ok(Some(count as usize)),
        Ok(_) => Err(CommandParserError::NotPositive.into()),
        Err(CommandParserError::EndOfStream) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Shapes popped elements as a bulk string, or as an array when a count was given.
pub(super) fn pop_reply(popped: Option<Vec<Bytes>>, with_count: bool) -> Frame {
    match (popped, with_count) {
        (None, true) => Frame::NullArray,
        (None, false) => Frame::NullBulkString,
        (Some(values), true) => Frame::bulk_array(values),
        (Some(values), false) => Frame::optional_bulk(values.into_iter().next()),
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    fn list(values: &[&'static str]) -> List {
        values.iter().map(|value| Bytes::from(*value)).collect()
    }

    #[test]
    fn pops_head_and_deletes_empty_list() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("LPOP")),
            Frame::Bulk(Bytes::from("mylist")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Lpop(Lpop {
                key: Bytes::from("mylist"),
                count: None,
            })
        );

        let mut store = Keyspace::new();
        store.set(Bytes::from("mylist"), list(&["a"]));

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(res, Frame::Bulk(Bytes::from("a")));
        assert!(!store.exists(b"mylist"));
    }

    #[test]
    fn with_count() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("LPOP")),
            Frame::Bulk(Bytes::from("mylist")),
            Frame::Bulk(Bytes::from("2")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let mut store = Keyspace::new();
        store.set(Bytes::from("mylist"), list(&["a", "b", "c"]));

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(
            res,
            Frame::Array(vec![Frame::Bulk(Bytes::from("a")), Frame::Bulk(Bytes::from("b"))])
        );
        assert_eq!(store.get_as::<List>(b"mylist"), Ok(Some(&list(&["c"]))));
    }

    #[test]
    fn missing_key() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("LPOP")),
            Frame::Bulk(Bytes::from("mylist")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let res = run(cmd, &mut Keyspace::new()).unwrap();

        assert_eq!(res, Frame::NullBulkString);
    }
}
