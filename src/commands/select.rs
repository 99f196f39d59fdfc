use crate::commands::executable::{Context, Executable};
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::Error;

/// Select the Redis logical database having the specified zero-based numeric index. Only the
/// database 0 exists.
///
/// Ref: <https://redis.io/docs/latest/commands/select>
#[derive(Debug, PartialEq)]
pub struct Select {
    pub index: i64,
}

impl Executable for Select {
    fn exec(self, _ctx: &mut Context) -> Result<Frame, Error> {
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Select {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let index = parser.next_integer()?;
        if index != 0 {
            return Err(CommandParserError::DbIndexOutOfRange.into());
        }
        Ok(Self { index })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::commands::{run, Command};
    use crate::store::Keyspace;

    use super::*;

    #[test]
    fn default_database() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("SELECT")),
            Frame::Bulk(Bytes::from("0")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(cmd, Command::Select(Select { index: 0 }));

        let res = run(cmd, &mut Keyspace::new()).unwrap();

        assert_eq!(res, Frame::ok());
    }

    #[test]
    fn out_of_range() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("SELECT")),
            Frame::Bulk(Bytes::from("3")),
        ]);
        let err = Command::try_from(frame).err().unwrap();
        let err = err.downcast_ref::<CommandParserError>().unwrap();

        assert_eq!(*err, CommandParserError::DbIndexOutOfRange);
        assert_eq!(err.to_string(), "ERR DB index is out of range");
    }
}
