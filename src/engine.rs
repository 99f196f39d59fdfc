use bytes::Bytes;
use std::collections::HashMap;
use std::iter;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error as ThisError;
use tokio::sync::Mutex as AsyncMutex;
use tokio::time::{sleep, Duration, Instant};
use tracing::debug;
use uuid::Uuid;

use crate::commands::brpop::Brpop;
use crate::commands::Command;
use crate::frame::Frame;
use crate::session::{ClientInfo, Session, Step};
use crate::store::Store;
use crate::Error;

/// How often a blocked `BRPOP` looks at its lists again.
const BLOCK_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, ThisError, PartialEq)]
pub enum EngineError {
    #[error("ERR unknown session {0}")]
    UnknownSession(Uuid),
}

/// The entry point for clients: owns the keyspace and the sessions talking to it.
///
/// Each session is driven by one caller at a time. Commands of different sessions interleave at
/// command granularity, since every command (or `EXEC` batch) runs under the keyspace lock.
pub struct Engine {
    store: Store,
    sessions: Mutex<HashMap<Uuid, Arc<AsyncMutex<Session>>>>,
    next_client_id: AtomicU64,
    max_queued: usize,
}

impl Engine {
    pub fn new(max_queued: usize) -> Engine {
        Engine {
            store: Store::new(),
            sessions: Mutex::new(HashMap::new()),
            next_client_id: AtomicU64::new(1),
            max_queued,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn begin_session(&self) -> Uuid {
        let id = Uuid::new_v4();
        let client_id = self.next_client_id.fetch_add(1, Ordering::Relaxed);
        let session = Session::new(id, client_id, self.max_queued);

        self.sessions()
            .insert(id, Arc::new(AsyncMutex::new(session)));

        let mut keyspace = self.store.lock();
        keyspace.stats.connected_clients += 1;
        keyspace.stats.total_connections_received += 1;

        debug!(session = %id, client_id, "session started");
        id
    }

    /// Forgets the session. A transaction it left open is discarded.
    pub fn end_session(&self, id: Uuid) {
        if self.sessions().remove(&id).is_some() {
            let mut keyspace = self.store.lock();
            keyspace.stats.connected_clients = keyspace.stats.connected_clients.saturating_sub(1);

            debug!(session = %id, "session ended");
        }
    }

    /// Runs the command `name` with `args` in the given session.
    pub async fn execute(&self, id: Uuid, name: &str, args: Vec<Bytes>) -> Result<Frame, Error> {
        let frame = Frame::Array(
            iter::once(Bytes::copy_from_slice(name.as_bytes()))
                .chain(args)
                .map(Frame::Bulk)
                .collect(),
        );

        self.execute_frame(id, frame).await
    }

    /// Handles one request frame in the given session. Command failures are error replies, the
    /// only error returned is an unknown session.
    pub async fn execute_frame(&self, id: Uuid, frame: Frame) -> Result<Frame, Error> {
        let session = self.session(id)?;
        let mut session = session.lock().await;

        Ok(self.step(&mut session, frame).await)
    }

    /// Handles a batch of request frames in order, one command at a time, returning one reply
    /// per frame. Frames after a `QUIT` are not run.
    pub async fn pipeline(&self, id: Uuid, frames: Vec<Frame>) -> Vec<Frame> {
        let session = match self.session(id) {
            Ok(session) => session,
            Err(err) => return vec![Frame::Error(err.to_string()); frames.len()],
        };
        let mut session = session.lock().await;

        let mut replies = Vec::with_capacity(frames.len());
        for frame in frames {
            replies.push(self.step(&mut session, frame).await);

            if session.client().quit {
                break;
            }
        }

        replies
    }

    /// A snapshot of the client metadata of the session.
    pub async fn client_info(&self, id: Uuid) -> Result<ClientInfo, Error> {
        let session = self.session(id)?;
        let session = session.lock().await;

        Ok(session.client().clone())
    }

    async fn step(&self, session: &mut Session, frame: Frame) -> Frame {
        match session.handle(&self.store, frame) {
            Step::Reply(reply) => reply,
            Step::Block(brpop) => self.block(session, brpop).await,
        }
    }

    /// Pops with `BRPOP` until a list has an element or the timeout elapses, zero meaning no
    /// timeout. The keyspace lock is released between attempts.
    async fn block(&self, session: &mut Session, brpop: Brpop) -> Frame {
        let deadline = if brpop.timeout.is_zero() {
            None
        } else {
            Instant::now().checked_add(brpop.timeout)
        };

        let mut reply = session.run(&self.store, Command::Brpop(brpop.clone()));

        loop {
            if reply != Frame::NullArray {
                return reply;
            }

            let wait = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return reply;
                    }
                    (deadline - now).min(BLOCK_POLL_INTERVAL)
                }
                None => BLOCK_POLL_INTERVAL,
            };

            sleep(wait).await;

            reply = session.retry(&self.store, Command::Brpop(brpop.clone()));
        }
    }

    fn session(&self, id: Uuid) -> Result<Arc<AsyncMutex<Session>>, EngineError> {
        self.sessions()
            .get(&id)
            .cloned()
            .ok_or(EngineError::UnknownSession(id))
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, Arc<AsyncMutex<Session>>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
