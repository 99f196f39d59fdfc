use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::Error;

/// The `CLIENT` container command. Only the subcommands dealing with the connection's own
/// metadata are supported.
///
/// Ref: <https://redis.io/docs/latest/commands/client/>
#[derive(Debug, PartialEq)]
pub enum Client {
    GetName,
    Id,
    SetInfo(SetInfo),
    SetName(Bytes),
}

/// Attributes a client library reports about itself through `CLIENT SETINFO`.
#[derive(Debug, PartialEq)]
pub enum SetInfo {
    LibName(Bytes),
    LibVersion(Bytes),
}

impl Executable for Client {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let client = &mut *ctx.client;

        let res = match self {
            Self::GetName => Frame::optional_bulk(client.name.clone()),
            Self::Id => Frame::Integer(client.id as i64),
            Self::SetInfo(SetInfo::LibName(name)) => {
                client.lib_name = Some(name);
                Frame::ok()
            }
            Self::SetInfo(SetInfo::LibVersion(version)) => {
                client.lib_version = Some(version);
                Frame::ok()
            }
            Self::SetName(name) => {
                // An empty name removes the current one.
                client.name = if name.is_empty() { None } else { Some(name) };
                Frame::ok()
            }
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Client {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let sub_command = parser.next_string()?.to_lowercase();

        match sub_command.as_str() {
            "getname" => Ok(Self::GetName),
            "id" => Ok(Self::Id),
            "setname" => {
                let name = parser.next_bytes()?;
                if name.iter().any(|b| *b <= b' ' || *b > b'~') {
                    return Err(CommandParserError::InvalidClientName.into());
                }
                Ok(Self::SetName(name))
            }
            "setinfo" => {
                let attribute = parser.next_string()?.to_lowercase();
                let value = parser.next_bytes()?;
                match attribute.as_str() {
                    "lib-name" => Ok(Self::SetInfo(SetInfo::LibName(value))),
                    "lib-ver" => Ok(Self::SetInfo(SetInfo::LibVersion(value))),
                    _ => Err(CommandParserError::InvalidCommandArgument {
                        command: "client|setinfo".to_string(),
                        argument: attribute,
                    }
                    .into()),
                }
            }
            _ => Err(CommandParserError::InvalidCommandArgument {
                command: "client".to_string(),
                argument: sub_command,
            }
            .into()),
        }
    }
}
