pub mod append;
pub mod bitcount;
pub mod brpop;
pub mod client;
pub mod dbsize;
pub mod decr;
pub mod decrby;
pub mod del;
pub mod discard;
pub mod echo;
pub mod exec;
pub mod executable;
pub mod exists;
pub mod expire;
pub mod flushdb;
pub mod get;
pub mod getbit;
pub mod getdel;
pub mod getrange;
pub mod getset;
pub mod hdel;
pub mod hexists;
pub mod hget;
pub mod hgetall;
pub mod hlen;
pub mod hmget;
pub mod hmset;
pub mod hset;
pub mod incr;
pub mod incrby;
pub mod incrbyfloat;
pub mod info;
pub mod keys;
pub mod llen;
pub mod lpop;
pub mod lpush;
pub mod lrange;
pub mod lrem;
pub mod mget;
pub mod mset;
pub mod multi;
pub mod persist;
pub mod pexpire;
pub mod ping;
pub mod psetex;
pub mod pttl;
pub mod quit;
pub mod rpop;
pub mod rpush;
pub mod sadd;
pub mod scard;
pub mod select;
pub mod set;
pub mod setbit;
pub mod setex;
pub mod setnx;
pub mod sismember;
pub mod smembers;
pub mod srem;
pub mod sscan;
pub mod strlen;
pub mod ttl;
pub mod type_;
pub mod zadd;
pub mod zcard;
pub mod zrange;
pub mod zrangebyscore;
pub mod zrem;
pub mod zremrangebyrank;
pub mod zremrangebyscore;
pub mod zrevrange;
pub mod zscore;

use bytes::Bytes;
use itertools::Itertools;
use std::str::FromStr;
use std::{str, vec};
use strum_macros::IntoStaticStr;
use thiserror::Error as ThisError;

use crate::commands::executable::{Context, Executable};
use crate::frame::Frame;
use crate::sorted_set::parse_score;
use crate::store::MAX_STRING_SIZE;
use crate::Error;

use append::Append;
use bitcount::Bitcount;
use brpop::Brpop;
use client::Client;
use dbsize::DBSize;
use decr::Decr;
use decrby::DecrBy;
use del::Del;
use discard::Discard;
use echo::Echo;
use exec::Exec;
use exists::Exists;
use expire::Expire;
use flushdb::FlushDb;
use get::Get;
use getbit::Getbit;
use getdel::Getdel;
use getrange::Getrange;
use getset::Getset;
use hdel::Hdel;
use hexists::Hexists;
use hget::Hget;
use hgetall::Hgetall;
use hlen::Hlen;
use hmget::Hmget;
use hmset::Hmset;
use hset::Hset;
use incr::Incr;
use incrby::IncrBy;
use incrbyfloat::IncrByFloat;
use info::Info;
use keys::Keys;
use llen::Llen;
use lpop::Lpop;
use lpush::Lpush;
use lrange::Lrange;
use lrem::Lrem;
use mget::Mget;
use mset::Mset;
use multi::Multi;
use persist::Persist;
use pexpire::Pexpire;
use ping::Ping;
use psetex::Psetex;
use pttl::Pttl;
use quit::Quit;
use rpop::Rpop;
use rpush::Rpush;
use sadd::Sadd;
use scard::Scard;
use select::Select;
use set::Set;
use setbit::Setbit;
use setex::Setex;
use setnx::Setnx;
use sismember::Sismember;
use smembers::Smembers;
use srem::Srem;
use sscan::Sscan;
use strlen::Strlen;
use ttl::Ttl;
use type_::Type;
use zadd::Zadd;
use zcard::Zcard;
use zrange::Zrange;
use zrangebyscore::Zrangebyscore;
use zrem::Zrem;
use zremrangebyrank::Zremrangebyrank;
use zremrangebyscore::Zremrangebyscore;
use zrevrange::Zrevrange;
use zscore::Zscore;

#[derive(Debug, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    // Keys
    Del(Del),
    Exists(Exists),
    Expire(Expire),
    Keys(Keys),
    Persist(Persist),
    Pexpire(Pexpire),
    Pttl(Pttl),
    Ttl(Ttl),
    Type(Type),

    // Strings
    Append(Append),
    Bitcount(Bitcount),
    Decr(Decr),
    DecrBy(DecrBy),
    Get(Get),
    Getbit(Getbit),
    Getdel(Getdel),
    Getrange(Getrange),
    Getset(Getset),
    Incr(Incr),
    IncrBy(IncrBy),
    IncrByFloat(IncrByFloat),
    Mget(Mget),
    Mset(Mset),
    Psetex(Psetex),
    Set(Set),
    Setbit(Setbit),
    Setex(Setex),
    Setnx(Setnx),
    Strlen(Strlen),

    // Lists
    Brpop(Brpop),
    Llen(Llen),
    Lpop(Lpop),
    Lpush(Lpush),
    Lrange(Lrange),
    Lrem(Lrem),
    Rpop(Rpop),
    Rpush(Rpush),

    // Sets
    Sadd(Sadd),
    Scard(Scard),
    Sismember(Sismember),
    Smembers(Smembers),
    Srem(Srem),
    Sscan(Sscan),

    // Sorted sets
    Zadd(Zadd),
    Zcard(Zcard),
    Zrange(Zrange),
    Zrangebyscore(Zrangebyscore),
    Zrem(Zrem),
    Zremrangebyrank(Zremrangebyrank),
    Zremrangebyscore(Zremrangebyscore),
    Zrevrange(Zrevrange),
    Zscore(Zscore),

    // Hashes
    Hdel(Hdel),
    Hexists(Hexists),
    Hget(Hget),
    Hgetall(Hgetall),
    Hlen(Hlen),
    Hmget(Hmget),
    Hmset(Hmset),
    Hset(Hset),

    // Server and connection
    Client(Client),
    DBsize(DBSize),
    Echo(Echo),
    FlushDb(FlushDb),
    Info(Info),
    Ping(Ping),
    Quit(Quit),
    Select(Select),

    // Transactions
    Discard(Discard),
    Exec(Exec),
    Multi(Multi),
}

impl Executable for Command {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        match self {
            Command::Append(cmd) => cmd.exec(ctx),
            Command::Bitcount(cmd) => cmd.exec(ctx),
            Command::Brpop(cmd) => cmd.exec(ctx),
            Command::Client(cmd) => cmd.exec(ctx),
            Command::DBsize(cmd) => cmd.exec(ctx),
            Command::Decr(cmd) => cmd.exec(ctx),
            Command::DecrBy(cmd) => cmd.exec(ctx),
            Command::Del(cmd) => cmd.exec(ctx),
            Command::Discard(cmd) => cmd.exec(ctx),
            Command::Echo(cmd) => cmd.exec(ctx),
            Command::Exec(cmd) => cmd.exec(ctx),
            Command::Exists(cmd) => cmd.exec(ctx),
            Command::Expire(cmd) => cmd.exec(ctx),
            Command::FlushDb(cmd) => cmd.exec(ctx),
            Command::Get(cmd) => cmd.exec(ctx),
            Command::Getbit(cmd) => cmd.exec(ctx),
            Command::Getdel(cmd) => cmd.exec(ctx),
            Command::Getrange(cmd) => cmd.exec(ctx),
            Command::Getset(cmd) => cmd.exec(ctx),
            Command::Hdel(cmd) => cmd.exec(ctx),
            Command::Hexists(cmd) => cmd.exec(ctx),
            Command::Hget(cmd) => cmd.exec(ctx),
            Command::Hgetall(cmd) => cmd.exec(ctx),
            Command::Hlen(cmd) => cmd.exec(ctx),
            Command::Hmget(cmd) => cmd.exec(ctx),
            Command::Hmset(cmd) => cmd.exec(ctx),
            Command::Hset(cmd) => cmd.exec(ctx),
            Command::Incr(cmd) => cmd.exec(ctx),
            Command::IncrBy(cmd) => cmd.exec(ctx),
            Command::IncrByFloat(cmd) => cmd.exec(ctx),
            Command::Info(cmd) => cmd.exec(ctx),
            Command::Keys(cmd) => cmd.exec(ctx),
            Command::Llen(cmd) => cmd.exec(ctx),
            Command::Lpop(cmd) => cmd.exec(ctx),
            Command::Lpush(cmd) => cmd.exec(ctx),
            Command::Lrange(cmd) => cmd.exec(ctx),
            Command::Lrem(cmd) => cmd.exec(ctx),
            Command::Mget(cmd) => cmd.exec(ctx),
            Command::Mset(cmd) => cmd.exec(ctx),
            Command::Multi(cmd) => cmd.exec(ctx),
            Command::Persist(cmd) => cmd.exec(ctx),
            Command::Pexpire(cmd) => cmd.exec(ctx),
            Command::Ping(cmd) => cmd.exec(ctx),
            Command::Psetex(cmd) => cmd.exec(ctx),
            Command::Pttl(cmd) => cmd.exec(ctx),
            Command::Quit(cmd) => cmd.exec(ctx),
            Command::Rpop(cmd) => cmd.exec(ctx),
            Command::Rpush(cmd) => cmd.exec(ctx),
            Command::Sadd(cmd) => cmd.exec(ctx),
            Command::Scard(cmd) => cmd.exec(ctx),
            Command::Select(cmd) => cmd.exec(ctx),
            Command::Set(cmd) => cmd.exec(ctx),
            Command::Setbit(cmd) => cmd.exec(ctx),
            Command::Setex(cmd) => cmd.exec(ctx),
            Command::Setnx(cmd) => cmd.exec(ctx),
            Command::Sismember(cmd) => cmd.exec(ctx),
            Command::Smembers(cmd) => cmd.exec(ctx),
            Command::Srem(cmd) => cmd.exec(ctx),
            Command::Sscan(cmd) => cmd.exec(ctx),
            Command::Strlen(cmd) => cmd.exec(ctx),
            Command::Ttl(cmd) => cmd.exec(ctx),
            Command::Type(cmd) => cmd.exec(ctx),
            Command::Zadd(cmd) => cmd.exec(ctx),
            Command::Zcard(cmd) => cmd.exec(ctx),
            Command::Zrange(cmd) => cmd.exec(ctx),
            Command::Zrangebyscore(cmd) => cmd.exec(ctx),
            Command::Zrem(cmd) => cmd.exec(ctx),
            Command::Zremrangebyrank(cmd) => cmd.exec(ctx),
            Command::Zremrangebyscore(cmd) => cmd.exec(ctx),
            Command::Zrevrange(cmd) => cmd.exec(ctx),
            Command::Zscore(cmd) => cmd.exec(ctx),
        }
    }
}

impl Command {
    /// The lowercase command name, used in logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl TryFrom<Frame> for Command {
    type Error = Error;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        // Clients send commands to the Redis server as RESP arrays.
        let frames = match frame {
            Frame::Array(array) => array,
            frame => {
                return Err(CommandParserError::InvalidFrame {
                    expected: "array".to_string(),
                    actual: frame,
                }
                .into())
            }
        };

        let mut parser = CommandParser {
            parts: frames.into_iter(),
        };

        let command_name = parser.parse_command_name()?;

        let command = match &command_name[..] {
            "append" => Append::try_from(&mut parser).map(Command::Append),
            "bitcount" => Bitcount::try_from(&mut parser).map(Command::Bitcount),
            "brpop" => Brpop::try_from(&mut parser).map(Command::Brpop),
            "client" => Client::try_from(&mut parser).map(Command::Client),
            "dbsize" => DBSize::try_from(&mut parser).map(Command::DBsize),
            "decr" => Decr::try_from(&mut parser).map(Command::Decr),
            "decrby" => DecrBy::try_from(&mut parser).map(Command::DecrBy),
            "del" => Del::try_from(&mut parser).map(Command::Del),
            "discard" => Discard::try_from(&mut parser).map(Command::Discard),
            "echo" => Echo::try_from(&mut parser).map(Command::Echo),
            "exec" => Exec::try_from(&mut parser).map(Command::Exec),
            "exists" => Exists::try_from(&mut parser).map(Command::Exists),
            "expire" => Expire::try_from(&mut parser).map(Command::Expire),
            "flushall" | "flushdb" => FlushDb::try_from(&mut parser).map(Command::FlushDb),
            "get" => Get::try_from(&mut parser).map(Command::Get),
            "getbit" => Getbit::try_from(&mut parser).map(Command::Getbit),
            "getdel" => Getdel::try_from(&mut parser).map(Command::Getdel),
            "getrange" => Getrange::try_from(&mut parser).map(Command::Getrange),
            "getset" => Getset::try_from(&mut parser).map(Command::Getset),
            "hdel" => Hdel::try_from(&mut parser).map(Command::Hdel),
            "hexists" => Hexists::try_from(&mut parser).map(Command::Hexists),
            "hget" => Hget::try_from(&mut parser).map(Command::Hget),
            "hgetall" => Hgetall::try_from(&mut parser).map(Command::Hgetall),
            "hlen" => Hlen::try_from(&mut parser).map(Command::Hlen),
            "hmget" => Hmget::try_from(&mut parser).map(Command::Hmget),
            "hmset" => Hmset::try_from(&mut parser).map(Command::Hmset),
            "hset" => Hset::try_from(&mut parser).map(Command::Hset),
            "incr" => Incr::try_from(&mut parser).map(Command::Incr),
            "incrby" => IncrBy::try_from(&mut parser).map(Command::IncrBy),
            "incrbyfloat" => IncrByFloat::try_from(&mut parser).map(Command::IncrByFloat),
            "info" => Info::try_from(&mut parser).map(Command::Info),
            "keys" => Keys::try_from(&mut parser).map(Command::Keys),
            "llen" => Llen::try_from(&mut parser).map(Command::Llen),
            "lpop" => Lpop::try_from(&mut parser).map(Command::Lpop),
            "lpush" => Lpush::try_from(&mut parser).map(Command::Lpush),
            "lrange" => Lrange::try_from(&mut parser).map(Command::Lrange),
            "lrem" => Lrem::try_from(&mut parser).map(Command::Lrem),
            "mget" => Mget::try_from(&mut parser).map(Command::Mget),
            "mset" => Mset::try_from(&mut parser).map(Command::Mset),
            "multi" => Multi::try_from(&mut parser).map(Command::Multi),
            "persist" => Persist::try_from(&mut parser).map(Command::Persist),
            "pexpire" => Pexpire::try_from(&mut parser).map(Command::Pexpire),
            "ping" => Ping::try_from(&mut parser).map(Command::Ping),
            "psetex" => Psetex::try_from(&mut parser).map(Command::Psetex),
            "pttl" => Pttl::try_from(&mut parser).map(Command::Pttl),
            "quit" => Quit::try_from(&mut parser).map(Command::Quit),
            "rpop" => Rpop::try_from(&mut parser).map(Command::Rpop),
            "rpush" => Rpush::try_from(&mut parser).map(Command::Rpush),
            "sadd" => Sadd::try_from(&mut parser).map(Command::Sadd),
            "scard" => Scard::try_from(&mut parser).map(Command::Scard),
            "select" => Select::try_from(&mut parser).map(Command::Select),
            "set" => Set::try_from(&mut parser).map(Command::Set),
            "setbit" => Setbit::try_from(&mut parser).map(Command::Setbit),
            "setex" => Setex::try_from(&mut parser).map(Command::Setex),
            "setnx" => Setnx::try_from(&mut parser).map(Command::Setnx),
            "sismember" => Sismember::try_from(&mut parser).map(Command::Sismember),
            "smembers" => Smembers::try_from(&mut parser).map(Command::Smembers),
            "srem" => Srem::try_from(&mut parser).map(Command::Srem),
            "sscan" => Sscan::try_from(&mut parser).map(Command::Sscan),
            "strlen" => Strlen::try_from(&mut parser).map(Command::Strlen),
            "ttl" => Ttl::try_from(&mut parser).map(Command::Ttl),
            "type" => Type::try_from(&mut parser).map(Command::Type),
            "zadd" => Zadd::try_from(&mut parser).map(Command::Zadd),
            "zcard" => Zcard::try_from(&mut parser).map(Command::Zcard),
            "zrange" => Zrange::try_from(&mut parser).map(Command::Zrange),
            "zrangebyscore" => Zrangebyscore::try_from(&mut parser).map(Command::Zrangebyscore),
            "zrem" => Zrem::try_from(&mut parser).map(Command::Zrem),
            "zremrangebyrank" => Zremrangebyrank::try_from(&mut parser).map(Command::Zremrangebyrank),
            "zremrangebyscore" => {
                Zremrangebyscore::try_from(&mut parser).map(Command::Zremrangebyscore)
            }
            "zrevrange" => Zrevrange::try_from(&mut parser).map(Command::Zrevrange),
            "zscore" => Zscore::try_from(&mut parser).map(Command::Zscore),
            _ => {
                return Err(CommandParserError::UnknownCommand {
                    command: command_name,
                }
                .into())
            }
        };

        // Running out of arguments, or having some left over, means the client sent the wrong
        // number of them.
        let command = command.map_err(|err| match err.downcast_ref::<CommandParserError>() {
            Some(CommandParserError::EndOfStream) => CommandParserError::WrongNumberOfArguments {
                command: command_name.clone(),
            }
            .into(),
            _ => err,
        })?;

        if parser.has_next() {
            return Err(CommandParserError::WrongNumberOfArguments {
                command: command_name,
            }
            .into());
        }

        Ok(command)
    }
}

struct CommandParser {
    parts: vec::IntoIter<Frame>,
}

impl CommandParser {
    fn parse_command_name(&mut self) -> Result<String, CommandParserError> {
        let command_name = self
            .parts
            .next()
            .ok_or_else(|| CommandParserError::EndOfStream)?;

        match command_name {
            Frame::Simple(s) => Ok(s.to_lowercase()),
            Frame::Bulk(bytes) => str::from_utf8(&bytes[..])
                .map(|s| s.to_lowercase())
                .map_err(CommandParserError::InvalidUTF8String),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "simple string".to_string(),
                actual: frame,
            }),
        }
    }

    fn has_next(&self) -> bool {
        self.parts.len() > 0
    }

    fn next_string(&mut self) -> Result<String, CommandParserError> {
        let frame = self
            .parts
            .next()
            .ok_or_else(|| CommandParserError::EndOfStream)?;

        match frame {
            // Both `Simple` and `Bulk` representation may be strings. Strings are parsed to UTF-8.
            // While errors are stored as strings, they are considered separate types.
            Frame::Simple(s) => Ok(s),
            Frame::Bulk(bytes) => str::from_utf8(&bytes[..])
                .map(|s| s.to_string())
                .map_err(CommandParserError::InvalidUTF8String),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "simple or bulk string".to_string(),
                actual: frame,
            }),
        }
    }

    fn next_integer(&mut self) -> Result<i64, CommandParserError> {
        let frame = self
            .parts
            .next()
            .ok_or_else(|| CommandParserError::EndOfStream)?;

        match frame {
            Frame::Integer(i) => Ok(i),
            Frame::Simple(string) => string
                .parse::<i64>()
                .map_err(|_| CommandParserError::InvalidInteger),
            Frame::Bulk(bytes) => str::from_utf8(&bytes[..])
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or(CommandParserError::InvalidInteger),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "integer".to_string(),
                actual: frame,
            }),
        }
    }

    /// A finite or infinite float argument. NaN is never accepted.
    fn next_float(&mut self) -> Result<f64, CommandParserError> {
        let frame = self
            .parts
            .next()
            .ok_or_else(|| CommandParserError::EndOfStream)?;

        match frame {
            Frame::Integer(i) => Ok(i as f64),
            Frame::Simple(string) => parse_score(&string).ok_or(CommandParserError::InvalidFloat),
            Frame::Bulk(bytes) => str::from_utf8(&bytes[..])
                .ok()
                .and_then(parse_score)
                .ok_or(CommandParserError::InvalidFloat),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "float".to_string(),
                actual: frame,
            }),
        }
    }

    fn next_bytes(&mut self) -> Result<Bytes, CommandParserError> {
        let frame = self
            .parts
            .next()
            .ok_or_else(|| CommandParserError::EndOfStream)?;

        match frame {
            Frame::Simple(s) => Ok(Bytes::from(s)),
            Frame::Bulk(bytes) => Ok(bytes),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "simple or bulk string".to_string(),
                actual: frame,
            }),
        }
    }

    /// A bit offset into a string: within the 512MB a string value can hold.
    fn next_bit_offset(&mut self) -> Result<usize, CommandParserError> {
        let offset = self
            .next_integer()
            .map_err(|err| match err {
                CommandParserError::InvalidInteger => CommandParserError::InvalidBitOffset,
                err => err,
            })?;

        if offset < 0 || offset as usize >= MAX_STRING_SIZE * 8 {
            return Err(CommandParserError::InvalidBitOffset);
        }

        Ok(offset as usize)
    }

    /// Parses the next argument as a keyword such as `NX` or `WITHSCORES`. Anything that does not
    /// name a known keyword is a syntax error.
    fn next_keyword<T: FromStr>(&mut self) -> Result<T, CommandParserError> {
        self.next_string()?
            .parse::<T>()
            .map_err(|_| CommandParserError::Syntax)
    }

    /// Consumes the next argument only when it names a keyword of type `T`.
    fn next_if_keyword<T: FromStr>(&mut self) -> Option<T> {
        let keyword = match self.parts.as_slice().first()? {
            Frame::Simple(s) => s.parse::<T>().ok()?,
            Frame::Bulk(bytes) => str::from_utf8(bytes).ok()?.parse::<T>().ok()?,
            _ => return None,
        };

        self.parts.next();
        Some(keyword)
    }

    /// Every argument left, requiring at least one.
    fn remaining_bytes(&mut self) -> Result<Vec<Bytes>, CommandParserError> {
        let mut values = vec![];

        loop {
            match self.next_bytes() {
                Ok(value) => values.push(value),
                Err(CommandParserError::EndOfStream) if !values.is_empty() => {
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(values)
    }

    /// Every argument left as consecutive pairs, requiring at least one pair.
    fn remaining_pairs(&mut self) -> Result<Vec<(Bytes, Bytes)>, CommandParserError> {
        let values = self.remaining_bytes()?;
        if values.len() % 2 != 0 {
            return Err(CommandParserError::EndOfStream);
        }

        Ok(values.into_iter().tuples().collect())
    }
}

#[derive(Debug, ThisError, PartialEq)]
pub(crate) enum CommandParserError {
    #[error("ERR Protocol error: expected {expected}, got {actual}")]
    InvalidFrame { expected: String, actual: Frame },
    #[error("ERR unknown command '{command}'")]
    UnknownCommand { command: String },
    #[error("ERR wrong number of arguments for '{command}' command")]
    WrongNumberOfArguments { command: String },
    #[error("ERR unknown subcommand '{argument}' for '{command}'")]
    InvalidCommandArgument { command: String, argument: String },
    #[error("ERR syntax error")]
    Syntax,
    #[error("ERR value is not an integer or out of range")]
    InvalidInteger,
    #[error("ERR value is not a valid float")]
    InvalidFloat,
    #[error("ERR invalid expire time in '{command}' command")]
    InvalidExpireTime { command: String },
    #[error("ERR Client names cannot contain spaces, newlines or special characters.")]
    InvalidClientName,
    #[error("ERR value is out of range, must be positive")]
    NotPositive,
    #[error("ERR min or max is not a float")]
    InvalidScoreRange,
    #[error("ERR INCR option is not supported")]
    IncrNotSupported,
    #[error("ERR invalid cursor")]
    InvalidCursor,
    #[error("ERR timeout is not a float or out of range")]
    InvalidTimeout,
    #[error("ERR timeout is negative")]
    NegativeTimeout,
    #[error("ERR bit offset is not an integer or out of range")]
    InvalidBitOffset,
    #[error("ERR bit is not an integer or out of range")]
    InvalidBit,
    #[error("ERR DB index is out of range")]
    DbIndexOutOfRange,
    #[error("ERR invalid UTF-8 string")]
    InvalidUTF8String(#[from] str::Utf8Error),
    #[error("ERR attempting to extract a value failed due to the frame being fully consumed")]
    EndOfStream,
}

#[cfg(test)]
pub(crate) fn run(cmd: Command, store: &mut crate::store::Keyspace) -> Result<Frame, Error> {
    let mut client = crate::session::ClientInfo::default();
    cmd.exec(&mut Context::new(store, &mut client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_get_command_with_simple_string() {
        let get_frame = Frame::Array(vec![
            Frame::Simple(String::from("GET")),
            Frame::Simple(String::from("foo")),
        ]);

        let get_command = Command::try_from(get_frame).unwrap();

        assert_eq!(
            get_command,
            Command::Get(Get {
                key: Bytes::from("foo")
            })
        );
    }

    #[test]
    fn parse_get_command_with_bulk_string() {
        let get_frame = Frame::Array(vec![
            Frame::Simple(String::from("GET")),
            Frame::Bulk(Bytes::from("foo-from-bytes")),
        ]);

        let get_command = Command::try_from(get_frame).unwrap();

        assert_eq!(
            get_command,
            Command::Get(Get {
                key: Bytes::from("foo-from-bytes")
            })
        );
    }

    #[test]
    fn command_names_are_case_insensitive() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("gEt")),
            Frame::Bulk(Bytes::from("foo")),
        ]);

        let cmd = Command::try_from(frame).unwrap();

        assert_eq!(cmd.name(), "get");
    }

    #[test]
    fn binary_keys() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GET")),
            Frame::Bulk(Bytes::from_static(&[0, 159, 146, 150, 255])),
        ]);

        let cmd = Command::try_from(frame).unwrap();

        assert_eq!(
            cmd,
            Command::Get(Get {
                key: Bytes::from_static(&[0, 159, 146, 150, 255])
            })
        );
    }

    #[test]
    fn unknown_command() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("BITOP")),
            Frame::Bulk(Bytes::from("AND")),
        ]);

        let err = Command::try_from(frame).unwrap_err();

        assert_eq!(err.to_string(), "ERR unknown command 'bitop'");
    }

    #[test]
    fn missing_arguments() {
        let frame = Frame::Array(vec![Frame::Bulk(Bytes::from("GET"))]);

        let err = Command::try_from(frame).unwrap_err();
        let err = err.downcast_ref::<CommandParserError>().unwrap();

        assert_eq!(
            *err,
            CommandParserError::WrongNumberOfArguments {
                command: "get".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "ERR wrong number of arguments for 'get' command"
        );
    }

    #[test]
    fn extra_arguments() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GET")),
            Frame::Bulk(Bytes::from("foo")),
            Frame::Bulk(Bytes::from("bar")),
        ]);

        let err = Command::try_from(frame).unwrap_err();
        let err = err.downcast_ref::<CommandParserError>().unwrap();

        assert_eq!(
            *err,
            CommandParserError::WrongNumberOfArguments {
                command: "get".to_string()
            }
        );
    }

    #[test]
    fn not_an_array() {
        let frame = Frame::Simple("PING".to_string());

        let err = Command::try_from(frame).unwrap_err();
        let err = err.downcast_ref::<CommandParserError>().unwrap();

        assert_eq!(
            *err,
            CommandParserError::InvalidFrame {
                expected: "array".to_string(),
                actual: Frame::Simple("PING".to_string()),
            }
        );
    }
}
