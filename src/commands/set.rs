use bytes::Bytes;
use strum_macros::EnumString;
use tokio::time::Duration;

use crate::commands::executable::{Context, Executable};
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::Error;

/// Set key to hold the string value. If key already holds a value, it is overwritten, regardless
/// of its type. Any previous time to live associated with the key is discarded on successful SET
/// operation, unless `KEEPTTL` is given.
///
/// Ref: <https://redis.io/docs/latest/commands/set/>
#[derive(Debug, PartialEq)]
pub struct Set {
    pub key: Bytes,
    pub value: Bytes,
    pub condition: Option<SetCondition>,
    pub expiry: Option<SetExpiry>,
    /// Reply with the previous value instead of `OK`.
    pub get: bool,
}

#[derive(Debug, PartialEq)]
pub enum SetCondition {
    /// Only set the key if it does not already exist.
    NotExists,
    /// Only set the key if it already exists.
    Exists,
}

#[derive(Debug, PartialEq)]
pub enum SetExpiry {
    Ttl(Duration),
    KeepTtl,
}

#[derive(Debug, PartialEq, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
enum SetOption {
    Nx,
    Xx,
    Ex,
    Px,
    Keepttl,
    Get,
}

impl Executable for Set {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        // With GET a non-string value fails the whole command before anything is written.
        let previous = if self.get {
            ctx.get_string(&self.key)?.cloned()
        } else {
            None
        };

        let skip = match self.condition {
            Some(SetCondition::NotExists) => ctx.exists(&self.key),
            Some(SetCondition::Exists) => !ctx.exists(&self.key),
            None => false,
        };

        if !skip {
            match self.expiry {
                Some(SetExpiry::Ttl(ttl)) => ctx.set_with_ttl(self.key, self.value, ttl),
                Some(SetExpiry::KeepTtl) => ctx.overwrite(self.key, self.value),
                None => ctx.set(self.key, self.value),
            }
        }

        let res = match (self.get, skip) {
            (true, _) => Frame::optional_bulk(previous),
            (false, true) => Frame::NullBulkString,
            (false, false) => Frame::ok(),
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Set {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let value = parser.next_bytes()?;

        let mut condition = None;
        let mut expiry = None;
        let mut get = false;

        while parser.has_next() {
            match parser.next_keyword::<SetOption>()? {
                SetOption::Nx if condition.is_none() => condition = Some(SetCondition::NotExists),
                SetOption::Xx if condition.is_none() => condition = Some(SetCondition::Exists),
                SetOption::Ex if expiry.is_none() => {
                    let seconds = parser.next_integer()?;
                    expiry = Some(SetExpiry::Ttl(ttl_from("set", seconds, 1000)?));
                }
                SetOption::Px if expiry.is_none() => {
                    let millis = parser.next_integer()?;
                    expiry = Some(SetExpiry::Ttl(ttl_from("set", millis, 1)?));
                }
                SetOption::Keepttl if expiry.is_none() => expiry = Some(SetExpiry::KeepTtl),
                SetOption::Get => get = true,
                _ => return Err(CommandParserError::Syntax.into()),
            }
        }

        Ok(Self {
            key,
            value,
            condition,
            expiry,
            get,
        })
    }
}

/// Turns an expire argument, counted in units of `unit_millis`, into a TTL. Shared by every
/// command that sets a string together with its expiry.
pub(crate) fn ttl_from(
    command: &str,
    amount: i64,
    unit_millis: i64,
) -> Result<Duration, CommandParserError> {
    let invalid = || CommandParserError::InvalidExpireTime {
        command: command.to_string(),
    };

    if amount <= 0 {
        return Err(invalid());
    }

    let millis = amount.checked_mul(unit_millis).ok_or_else(invalid)?;

    Ok(Duration::from_millis(millis as u64))
}

#[cfg(test)]
mod tests {
    use tokio::time;

    use crate::commands::{run, Command};
    use crate::store::{Keyspace, Ttl};
    use crate::value::List;

    use super::*;

    fn set_command(args: &[&'static str]) -> Result<Command, Error> {
        let mut frames = vec![Frame::Bulk(Bytes::from("SET"))];
        frames.extend(args.iter().map(|arg| Frame::Bulk(Bytes::from(*arg))));
        Command::try_from(Frame::Array(frames))
    }

    #[test]
    fn parse_set_command() {
        let set_frame = Frame::Array(vec![
            Frame::Simple(String::from("SET")),
            Frame::Simple(String::from("foo")),
            Frame::Bulk(Bytes::from("baz")),
        ]);

        let set_command = Command::try_from(set_frame).unwrap();

        assert_eq!(
            set_command,
            Command::Set(Set {
                key: Bytes::from("foo"),
                value: Bytes::from("baz"),
                condition: None,
                expiry: None,
                get: false,
            })
        );
    }

    #[test]
    fn parse_options() {
        let cmd = set_command(&["foo", "bar", "nx", "EX", "10", "GET"]).unwrap();

        assert_eq!(
            cmd,
            Command::Set(Set {
                key: Bytes::from("foo"),
                value: Bytes::from("bar"),
                condition: Some(SetCondition::NotExists),
                expiry: Some(SetExpiry::Ttl(Duration::from_secs(10))),
                get: true,
            })
        );
    }

    #[test]
    fn conflicting_options() {
        for args in [
            &["foo", "bar", "NX", "XX"][..],
            &["foo", "bar", "EX", "10", "PX", "100"][..],
            &["foo", "bar", "EX", "10", "KEEPTTL"][..],
            &["foo", "bar", "SOON"][..],
        ] {
            let err = set_command(args).unwrap_err();
            let err = err.downcast_ref::<CommandParserError>().unwrap();

            assert_eq!(*err, CommandParserError::Syntax, "{args:?}");
        }
    }

    #[test]
    fn invalid_expire_time() {
        let err = set_command(&["foo", "bar", "EX", "0"]).unwrap_err();

        assert_eq!(err.to_string(), "ERR invalid expire time in 'set' command");

        let err = set_command(&["foo", "bar", "PX", "-5"]).unwrap_err();

        assert_eq!(err.to_string(), "ERR invalid expire time in 'set' command");
    }

    #[tokio::test]
    async fn with_ttl() {
        time::pause();

        let mut store = Keyspace::new();
        let cmd = set_command(&["foo", "bar", "PX", "100"]).unwrap();

        let res = run(cmd, &mut store).unwrap();
        assert_eq!(res, Frame::ok());
        assert_eq!(
            store.ttl(b"foo"),
            Ttl::Remaining(Duration::from_millis(100))
        );

        time::advance(Duration::from_millis(100)).await;

        assert_eq!(store.get(b"foo"), None);
    }

    #[tokio::test]
    async fn replaces_any_type_and_clears_ttl() {
        let mut store = Keyspace::new();
        store.set_with_ttl(
            Bytes::from("foo"),
            List::from(vec![Bytes::from("a")]),
            Duration::from_secs(10),
        );

        let res = run(set_command(&["foo", "bar"]).unwrap(), &mut store).unwrap();

        assert_eq!(res, Frame::ok());
        assert_eq!(store.get_string(b"foo"), Ok(Some(&Bytes::from("bar"))));
        assert_eq!(store.ttl(b"foo"), Ttl::Infinite);
    }

    #[tokio::test]
    async fn keep_ttl() {
        time::pause();

        let mut store = Keyspace::new();
        store.set_with_ttl(
            Bytes::from("foo"),
            Bytes::from("bar"),
            Duration::from_secs(10),
        );

        let cmd = set_command(&["foo", "baz", "KEEPTTL"]).unwrap();
        run(cmd, &mut store).unwrap();

        assert_eq!(
            store.ttl(b"foo"),
            Ttl::Remaining(Duration::from_secs(10))
        );
    }

    #[test]
    fn conditions() {
        let mut store = Keyspace::new();

        let res = run(set_command(&["foo", "1", "XX"]).unwrap(), &mut store).unwrap();
        assert_eq!(res, Frame::NullBulkString);
        assert!(!store.exists(b"foo"));

        let res = run(set_command(&["foo", "1", "NX"]).unwrap(), &mut store).unwrap();
        assert_eq!(res, Frame::ok());

        let res = run(set_command(&["foo", "2", "NX"]).unwrap(), &mut store).unwrap();
        assert_eq!(res, Frame::NullBulkString);
        assert_eq!(store.get_string(b"foo"), Ok(Some(&Bytes::from("1"))));

        let res = run(set_command(&["foo", "3", "XX", "GET"]).unwrap(), &mut store).unwrap();
        assert_eq!(res, Frame::Bulk(Bytes::from("1")));
        assert_eq!(store.get_string(b"foo"), Ok(Some(&Bytes::from("3"))));
    }

    #[test]
    fn get_on_wrong_type() {
        let mut store = Keyspace::new();
        store.set(Bytes::from("foo"), List::from(vec![Bytes::from("a")]));

        let err = run(set_command(&["foo", "1", "GET"]).unwrap(), &mut store).unwrap_err();

        assert_eq!(
            err.to_string(),
            "WRONGTYPE Operation against a key holding the wrong kind of value"
        );
        assert_eq!(
            store.get(b"foo").map(|value| value.value_type().to_string()),
            Some("list".to_string())
        );
    }
}
