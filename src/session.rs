use bytes::Bytes;
use std::mem;
use thiserror::Error as ThisError;
use tracing::debug;
use uuid::Uuid;

use crate::commands::brpop::Brpop;
use crate::commands::executable::{Context, Executable};
use crate::commands::Command;
use crate::frame::Frame;
use crate::store::{Keyspace, Store};
use crate::Error;

/// Metadata of the client behind a session, as reported and changed by `CLIENT`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientInfo {
    pub id: u64,
    pub name: Option<Bytes>,
    pub lib_name: Option<Bytes>,
    pub lib_version: Option<Bytes>,
    /// Set by `QUIT`: the connection closes once the pending replies are written.
    pub quit: bool,
}

impl ClientInfo {
    pub fn new(id: u64) -> ClientInfo {
        ClientInfo {
            id,
            ..ClientInfo::default()
        }
    }
}

#[derive(Debug, ThisError, PartialEq)]
pub enum TransactionError {
    #[error("ERR MULTI calls can not be nested")]
    NestedMulti,
    #[error("ERR EXEC without MULTI")]
    ExecWithoutMulti,
    #[error("ERR DISCARD without MULTI")]
    DiscardWithoutMulti,
    #[error("EXECABORT Transaction discarded because of previous errors.")]
    ExecAbort,
    #[error("ERR transaction discarded, more than {max} commands queued")]
    QueueFull { max: usize },
}

#[derive(Debug)]
enum State {
    Normal,
    Queuing {
        queue: Vec<Command>,
        /// A command failed to parse while queuing, so `EXEC` must refuse to run anything.
        aborted: bool,
    },
}

/// What handling a request frame resulted in.
#[derive(Debug, PartialEq)]
pub enum Step {
    Reply(Frame),
    /// A `BRPOP` found nothing to pop and may wait for a list to be pushed to. Waiting is left
    /// to the caller so the keyspace lock is never held while idle.
    Block(Brpop),
}

/// The per-client state machine: a session is either running commands as they arrive or, between
/// `MULTI` and `EXEC`/`DISCARD`, queuing them to be replayed atomically.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    client: ClientInfo,
    state: State,
    max_queued: usize,
}

impl Session {
    pub fn new(id: Uuid, client_id: u64, max_queued: usize) -> Session {
        Session {
            id,
            client: ClientInfo::new(client_id),
            state: State::Normal,
            max_queued,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn client(&self) -> &ClientInfo {
        &self.client
    }

    pub fn in_transaction(&self) -> bool {
        matches!(self.state, State::Queuing { .. })
    }

    /// Parses and handles one request frame. Errors never escape: they become error replies.
    pub fn handle(&mut self, store: &Store, frame: Frame) -> Step {
        let command = Command::try_from(frame);

        match self.state {
            State::Normal => match command {
                Ok(Command::Multi(_)) => {
                    self.state = State::Queuing {
                        queue: vec![],
                        aborted: false,
                    };
                    Step::Reply(Frame::ok())
                }
                Ok(Command::Brpop(brpop)) => Step::Block(brpop),
                Ok(command) => Step::Reply(self.run(store, command)),
                Err(err) => Step::Reply(error_reply(err)),
            },
            State::Queuing { .. } => Step::Reply(self.enqueue(store, command)),
        }
    }

    /// Runs a single command under the keyspace lock.
    pub fn run(&mut self, store: &Store, command: Command) -> Frame {
        let mut keyspace = store.lock();
        keyspace.stats.total_commands_processed += 1;
        self.apply(&mut keyspace, command)
    }

    /// Runs a command again without counting it as a new one, for blocked commands polling
    /// for data.
    pub fn retry(&mut self, store: &Store, command: Command) -> Frame {
        let mut keyspace = store.lock();
        self.apply(&mut keyspace, command)
    }

    fn enqueue(&mut self, store: &Store, command: Result<Command, Error>) -> Frame {
        let command = match command {
            Ok(Command::Exec(_)) => return self.exec(store),
            Ok(Command::Discard(_)) => {
                self.state = State::Normal;
                return Frame::ok();
            }
            Ok(Command::Multi(_)) => return error_reply(TransactionError::NestedMulti.into()),
            Ok(command) => command,
            Err(err) => {
                if let State::Queuing { aborted, .. } = &mut self.state {
                    *aborted = true;
                }
                return error_reply(err);
            }
        };

        let max_queued = self.max_queued;
        if let State::Queuing { queue, .. } = &mut self.state {
            if queue.len() >= max_queued {
                self.state = State::Normal;
                return error_reply(TransactionError::QueueFull { max: max_queued }.into());
            }

            debug!(command = command.name(), "queued");
            queue.push(command);
        }

        Frame::Simple("QUEUED".to_string())
    }

    fn exec(&mut self, store: &Store) -> Frame {
        let State::Queuing { queue, aborted } = mem::replace(&mut self.state, State::Normal) else {
            return error_reply(TransactionError::ExecWithoutMulti.into());
        };

        if aborted {
            return error_reply(TransactionError::ExecAbort.into());
        }

        let mut keyspace = store.lock();
        let replies = queue
            .into_iter()
            .map(|command| {
                keyspace.stats.total_commands_processed += 1;
                self.apply(&mut keyspace, command)
            })
            .collect();

        Frame::Array(replies)
    }

    fn apply(&mut self, keyspace: &mut Keyspace, command: Command) -> Frame {
        let name = command.name();
        let mut ctx = Context::new(keyspace, &mut self.client);

        match command.exec(&mut ctx) {
            Ok(reply) => reply,
            Err(err) => {
                debug!(command = name, error = %err, "command failed");
                error_reply(err)
            }
        }
    }
}

fn error_reply(err: Error) -> Frame {
    Frame::Error(err.to_string())
}
