use bytes::Bytes;
use itertools::Itertools;

use crate::commands::executable::{Context, Executable};
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Keyspace;
use crate::Error;

/// The version reported to clients. Some client libraries gate features on it.
const REDIS_VERSION: &str = "7.2.4";

/// The INFO command returns information and statistics about the server in a format that is
/// simple to parse by computers and easy to read by humans.
///
/// Ref: <https://redis.io/docs/latest/commands/info/>
#[derive(Debug, PartialEq)]
pub struct Info {
    /// Sections to report, lowercased. Empty means every section.
    pub sections: Vec<String>,
}

impl Executable for Info {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error> {
        let report = Section::all(ctx)
            .into_iter()
            .filter(|section| self.wants(section.name))
            .map(|section| section.render())
            .join("\r\n");

        Ok(Frame::Bulk(Bytes::from(report)))
    }
}

impl Info {
    fn wants(&self, section: &str) -> bool {
        self.sections.is_empty()
            || self.sections.iter().any(|wanted| {
                matches!(wanted.as_str(), "all" | "default" | "everything")
                    || wanted.eq_ignore_ascii_case(section)
            })
    }
}

impl TryFrom<&mut CommandParser> for Info {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let mut sections = vec![];

        loop {
            match parser.next_string() {
                Ok(section) => sections.push(section.to_lowercase()),
                Err(CommandParserError::EndOfStream) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(Self { sections })
    }
}

struct Section {
    name: &'static str,
    fields: Vec<(&'static str, String)>,
}

impl Section {
    fn all(store: &Keyspace) -> Vec<Section> {
        let stats = &store.stats;

        vec![
            Section {
                name: "Server",
                fields: vec![
                    ("redis_version", REDIS_VERSION.to_string()),
                    ("redis_mode", "standalone".to_string()),
                    ("arch_bits", (usize::BITS).to_string()),
                    ("process_id", std::process::id().to_string()),
                    ("uptime_in_seconds", store.uptime().as_secs().to_string()),
                    (
                        "uptime_in_days",
                        (store.uptime().as_secs() / 86400).to_string(),
                    ),
                ],
            },
            Section {
                name: "Clients",
                fields: vec![("connected_clients", stats.connected_clients.to_string())],
            },
            Section {
                name: "Stats",
                fields: vec![
                    (
                        "total_connections_received",
                        stats.total_connections_received.to_string(),
                    ),
                    (
                        "total_commands_processed",
                        stats.total_commands_processed.to_string(),
                    ),
                    ("expired_keys", stats.expired_keys.to_string()),
                ],
            },
            Section {
                name: "Keyspace",
                fields: match store.size() {
                    0 => vec![],
                    keys => vec![(
                        "db0",
                        format!("keys={},expires={},avg_ttl=0", keys, store.expires()),
                    )],
                },
            },
        ]
    }

    fn render(&self) -> String {
        let mut lines = vec![format!("# {}", self.name)];
        lines.extend(
            self.fields
                .iter()
                .map(|(field, value)| format!("{field}:{value}")),
        );
        lines.push(String::new());
        lines.join("\r\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{run, Command};

    use super::*;

    #[test]
    fn full_report() {
        let frame = Frame::Array(vec![Frame::Bulk(Bytes::from("INFO"))]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(cmd, Command::Info(Info { sections: vec![] }));

        let mut store = Keyspace::new();
        store.set(Bytes::from("key1"), Bytes::from("1"));
        store.stats.connected_clients = 2;

        let res = run(cmd, &mut store).unwrap();
        let Frame::Bulk(report) = res else {
            panic!("expected a bulk string, got {res:?}");
        };
        let report = String::from_utf8(report.to_vec()).unwrap();

        assert!(report.contains("# Server\r\nredis_version:7.2.4\r\n"));
        assert!(report.contains("connected_clients:2\r\n"));
        assert!(report.contains("db0:keys=1,expires=0,avg_ttl=0\r\n"));
    }

    #[test]
    fn single_section() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("INFO")),
            Frame::Bulk(Bytes::from("Keyspace")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        let mut store = Keyspace::new();
        store.set(Bytes::from("key1"), Bytes::from("1"));

        let res = run(cmd, &mut store).unwrap();

        assert_eq!(
            res,
            Frame::Bulk(Bytes::from(
                "# Keyspace\r\ndb0:keys=1,expires=0,avg_ttl=0\r\n"
            ))
        );
    }
}
