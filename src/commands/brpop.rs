use bytes::Bytes;
use tokio::time::Duration;

use crate::commands::executable::{Context, Executable};
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::value::List;
use crate::Error;

/// BRPOP is a blocking list pop primitive: it pops an element from the tail of the first list
/// that is non-empty, with the given keys being checked in the order that they are given.
///
/// Executing it is a single non-blocking attempt that replies a null array when every list is
/// empty. Waiting for up to `timeout` (zero meaning forever) is done by the engine, which retries
/// the attempt outside of transactions.
///
/// Ref: <https://redis.io/docs/latest/commands/brpop/>
#[derive(Debug, Clone, PartialEq)]
pub struct Brpop {
    pub keys: Vec<Bytes>,
    pub timeout: Duration,
}

impl Executable for Brpop {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        for key in self.keys {
            if let Some(value) = ctx.update(&key, |list: &mut List| list.pop_back())?.flatten() {
                return Ok(Frame::bulk_array([key, value]));
            }
        }

        Ok(Frame::NullArray)
    }
}

impl TryFrom<&mut CommandParser> for Brpop {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let mut args = parser.remaining_bytes()?;
        if args.len() < 2 {
            return Err(CommandParserError::EndOfStream.into());
        }

        let timeout = args.pop().ok_or(CommandParserError::EndOfStream)?;
        let timeout = std::str::from_utf8(&timeout)
            .ok()
            .and_then(|timeout| timeout.parse::<f64>().ok())
            .filter(|timeout| timeout.is_finite())
            .ok_or(CommandParserError::InvalidTimeout)?;

        if timeout < 0.0 {
            return Err(CommandParserError::NegativeTimeout.into());
        }

        let timeout =
            Duration::try_from_secs_f64(timeout).map_err(|_| CommandParserError::InvalidTimeout)?;

        Ok(Self {
            keys: args,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    #[test]
    fn pops_from_first_non_empty_list() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("BRPOP")),
            Frame::Bulk(Bytes::from("list1")),
            Frame::Bulk(Bytes::from("list2")),
            Frame::Bulk(Bytes::from("0.5")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Brpop(Brpop {
                keys: vec![Bytes::from("list1"), Bytes::from("list2")],
                timeout: Duration::from_millis(500),
            })
        );

        let mut store = Keyspace::new();
        store.set(
            Bytes::from("list2"),
            List::from(vec![Bytes::from("a"), Bytes::from("b")]),
        );

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(
            res,
            Frame::Array(vec![
                Frame::Bulk(Bytes::from("list2")),
                Frame::Bulk(Bytes::from("b"))
            ])
        );
    }

    #[test]
    fn nothing_to_pop() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("BRPOP")),
            Frame::Bulk(Bytes::from("list1")),
            Frame::Bulk(Bytes::from("0")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let res = run(cmd, &mut Keyspace::new()).unwrap();

        assert_eq!(res, Frame::NullArray);
    }

    #[test]
    fn invalid_timeout() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("BRPOP")),
            Frame::Bulk(Bytes::from("list1")),
            Frame::Bulk(Bytes::from("-1")),
        ]);
        let err = Command::try_from(frame).unwrap_err();

        assert_eq!(err.to_string(), "ERR timeout is negative");

        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("BRPOP")),
            Frame::Bulk(Bytes::from("list1")),
        ]);
        let err = Command::try_from(frame).unwrap_err();

        assert_eq!(
            err.to_string(),
            "ERR wrong number of arguments for 'brpop' command"
        );
    }
}
