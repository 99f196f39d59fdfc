use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::frame::Frame;
use crate::utils::range::clamp_range;
use crate::value::List;
use crate::Error;

/// Returns the specified elements of the list stored at key. The offsets start and stop are zero-
/// based indexes, with 0 being the first element of the list. Negative offsets count from the end
/// of the list. Out of range indexes will not produce an error.
///
/// Ref: <https://redis.io/docs/latest/commands/lrange/>
#[derive(Debug, PartialEq)]
pub struct Lrange {
    pub key: Bytes,
    pub start: i64,
    pub stop: i64,
}

impl Executable for Lrange {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let Some(list) = ctx.get_as::<List>(&self.key)? else {
            return Ok(Frame::Array(vec![]));
        };

        let values = match clamp_range(self.start, self.stop, list.len()) {
            Some(range) => list.range(range).cloned().collect(),
            None => vec![],
        };

        Ok(Frame::bulk_array(values))
    }
}

impl TryFrom<&mut CommandParser> for Lrange {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let start = parser.next_integer()?;
        let stop = parser.next_integer()?;

        Ok(Self { key, start, stop })
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    fn lrange(store: &mut Keyspace, start: i64, stop: i64) -> Frame {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("LRANGE")),
            Frame::Bulk(Bytes::from("mylist")),
            Frame::Bulk(Bytes::from(start.to_string())),
            Frame::Bulk(Bytes::from(stop.to_string())),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Lrange(Lrange {
                key: Bytes::from("mylist"),
                start,
                stop,
            })
        );
        run(cmd, store).unwrap()
    }

    fn bulks(values: &[&'static str]) -> Frame {
        Frame::bulk_array(values.iter().map(|value| Bytes::from(*value)))
    }

    #[test]
    fn ranges() {
        let mut store = Keyspace::new();
        store.set(
            Bytes::from("mylist"),
            List::from(vec![Bytes::from("a"), Bytes::from("b"), Bytes::from("c")]),
        );

        assert_eq!(lrange(&mut store, 0, 0), bulks(&["a"]));
        assert_eq!(lrange(&mut store, -3, 2), bulks(&["a", "b", "c"]));
        assert_eq!(lrange(&mut store, -100, 100), bulks(&["a", "b", "c"]));
        assert_eq!(lrange(&mut store, 1, -1), bulks(&["b", "c"]));
        assert_eq!(lrange(&mut store, 5, 10), bulks(&[]));
        assert_eq!(lrange(&mut store, 2, 1), bulks(&[]));
    }

    #[test]
    fn missing_key() {
        let mut store = Keyspace::new();

        assert_eq!(lrange(&mut store, 0, -1), bulks(&[]));
    }
}
