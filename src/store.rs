use bytes::Bytes;
use num_traits::{CheckedAdd, Zero};
use std::collections::HashMap;
use std::ops::Deref;
use std::str::{self, FromStr};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error as ThisError;
use tokio::time::{Duration, Instant};

use crate::value::{Container, Value};

/// Largest string value a key can hold.
pub const MAX_STRING_SIZE: usize = 512 * 1024 * 1024;

/// The Store is the keyspace shared by every session. It holds one [`Keyspace`] behind a single
/// lock: a command takes the lock for its whole execution (a transaction for its whole queue), so
/// no session ever observes another one half way through a command. Cloning is cheap and yields a
/// handle to the same keyspace.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<InnerStore>,
}

impl Store {
    pub fn new() -> Store {
        Store::default()
    }
}

impl Deref for Store {
    type Target = InnerStore;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Default)]
pub struct InnerStore {
    state: Mutex<Keyspace>,
}

impl InnerStore {
    pub fn lock(&self) -> MutexGuard<'_, Keyspace> {
        // A panic while holding the lock leaves the keyspace as the last completed mutation left
        // it, so it is still safe to keep serving.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, ThisError, PartialEq)]
pub enum StoreError {
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,
    #[error("ERR value is not an integer or out of range")]
    NotAnInteger,
    #[error("ERR value is not a valid float")]
    NotAFloat,
    #[error("ERR increment or decrement would overflow")]
    Overflow,
    #[error("ERR increment would produce NaN or Infinity")]
    NotFinite,
    #[error("ERR string exceeds maximum allowed size (512MB)")]
    TooLarge,
}

/// Result of a TTL lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// The key exists and never expires.
    Infinite,
    /// The key exists and expires after this long.
    Remaining(Duration),
    /// The key does not exist (or already expired).
    Absent,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub value: Value,
    pub expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Counters reported by `INFO`.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub connected_clients: u64,
    pub total_connections_received: u64,
    pub total_commands_processed: u64,
    pub expired_keys: u64,
}

/// The key to entry mapping of the database.
///
/// Expiry is lazy: an entry whose deadline has passed stays in the map until something touches
/// its key, at which point [`Keyspace::evict_if_expired`] drops it before the access proceeds.
/// Every accessor below goes through that check, so callers never see an expired entry.
#[derive(Debug)]
pub struct Keyspace {
    entries: HashMap<Bytes, Entry>,
    started_at: Instant,
    pub stats: Stats,
}

impl Default for Keyspace {
    fn default() -> Self {
        Keyspace {
            entries: HashMap::new(),
            started_at: Instant::now(),
            stats: Stats::default(),
        }
    }
}

impl Keyspace {
    pub fn new() -> Keyspace {
        Keyspace::default()
    }

    /// Drops the entry under `key` if its deadline has passed. Returns whether it did.
    pub fn evict_if_expired(&mut self, key: &[u8]) -> bool {
        let now = Instant::now();
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(now));

        if expired {
            self.entries.remove(key);
            self.stats.expired_keys += 1;
        }

        expired
    }

    pub fn get(&mut self, key: &[u8]) -> Option<&Value> {
        self.evict_if_expired(key);
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut Value> {
        self.evict_if_expired(key);
        self.entries.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Binds `key` to `value`, replacing whatever was there, whatever its type, and dropping any
    /// TTL it had.
    pub fn set(&mut self, key: Bytes, value: impl Into<Value>) {
        let value = value.into();
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: None,
            },
        );
    }

    pub fn set_with_ttl(&mut self, key: Bytes, value: impl Into<Value>, ttl: Duration) {
        let value = value.into();
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: deadline(ttl),
            },
        );
    }

    /// Replaces the value under `key` but keeps its TTL, as in-place edits such as `APPEND` or
    /// `INCR` do.
    pub fn overwrite(&mut self, key: Bytes, value: impl Into<Value>) {
        let value = value.into();
        self.evict_if_expired(&key);
        match self.entries.get_mut(&key) {
            Some(entry) => entry.value = value,
            None => self.set(key, value),
        }
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Value> {
        self.evict_if_expired(key);
        self.entries.remove(key).map(|entry| entry.value)
    }

    pub fn exists(&mut self, key: &[u8]) -> bool {
        self.evict_if_expired(key);
        self.entries.contains_key(key)
    }

    /// Sets the key to expire after `ttl`. Returns `false`, without creating anything, when the
    /// key does not exist.
    pub fn expire(&mut self, key: &[u8], ttl: Duration) -> bool {
        self.evict_if_expired(key);
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.expires_at = deadline(ttl);
                true
            }
            None => false,
        }
    }

    /// Removes the TTL of `key`. Returns whether there was one to remove.
    pub fn persist(&mut self, key: &[u8]) -> bool {
        self.evict_if_expired(key);
        self.entries
            .get_mut(key)
            .and_then(|entry| entry.expires_at.take())
            .is_some()
    }

    pub fn ttl(&mut self, key: &[u8]) -> Ttl {
        self.evict_if_expired(key);
        match self.entries.get(key) {
            Some(Entry {
                expires_at: Some(expires_at),
                ..
            }) => Ttl::Remaining(expires_at.saturating_duration_since(Instant::now())),
            Some(_) => Ttl::Infinite,
            None => Ttl::Absent,
        }
    }

    /// Number of keys that have not expired.
    pub fn size(&self) -> usize {
        let now = Instant::now();
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    /// Number of live keys that carry a TTL.
    pub fn expires(&self) -> usize {
        let now = Instant::now();
        self.entries
            .values()
            .filter(|entry| entry.expires_at.is_some() && !entry.is_expired(now))
            .count()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Bytes> {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(move |(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key)
    }

    pub fn flush(&mut self) {
        self.entries.clear();
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// The string stored at `key`, if any.
    pub fn get_string(&mut self, key: &[u8]) -> Result<Option<&Bytes>, StoreError> {
        match self.get(key) {
            Some(Value::String(data)) => Ok(Some(data)),
            Some(_) => Err(StoreError::WrongType),
            None => Ok(None),
        }
    }

    /// Adds `increment` to the integer stored at `key`, keeping its TTL. An absent key counts as
    /// zero.
    pub fn incr_by<T>(&mut self, key: &Bytes, increment: T) -> Result<T, StoreError>
    where
        T: FromStr + ToString + CheckedAdd + Zero,
    {
        let current = match self.get_string(key)? {
            // Only the canonical form counts, so `+5`, `007` and padded numbers are rejected.
            Some(data) => str::from_utf8(data)
                .ok()
                .and_then(|s| s.parse::<T>().ok().filter(|n| n.to_string() == s))
                .ok_or(StoreError::NotAnInteger)?,
            None => T::zero(),
        };

        let value = current
            .checked_add(&increment)
            .ok_or(StoreError::Overflow)?;

        self.overwrite(key.clone(), Bytes::from(value.to_string()));

        Ok(value)
    }

    pub fn incr_by_float(&mut self, key: &Bytes, increment: f64) -> Result<f64, StoreError> {
        let current = match self.get_string(key)? {
            Some(data) => str::from_utf8(data)
                .ok()
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|value| value.is_finite())
                .ok_or(StoreError::NotAFloat)?,
            None => 0.0,
        };

        let value = current + increment;
        if !value.is_finite() {
            return Err(StoreError::NotFinite);
        }

        self.overwrite(key.clone(), Bytes::from(value.to_string()));

        Ok(value)
    }

    /// The collection of type `T` stored at `key`, if any.
    pub fn get_as<T: Container>(&mut self, key: &[u8]) -> Result<Option<&T>, StoreError> {
        match self.get(key) {
            Some(value) => T::from_value(value).map(Some).ok_or(StoreError::WrongType),
            None => Ok(None),
        }
    }

    /// Runs `f` on the collection of type `T` stored at `key`, creating an empty one first when
    /// the key is absent. The key is removed if the collection is left empty.
    pub fn upsert<T, R>(&mut self, key: &Bytes, f: impl FnOnce(&mut T) -> R) -> Result<R, StoreError>
    where
        T: Container,
    {
        self.evict_if_expired(key);

        let entry = self.entries.entry(key.clone()).or_insert_with(|| Entry {
            value: T::default().into(),
            expires_at: None,
        });

        let container = T::from_value_mut(&mut entry.value).ok_or(StoreError::WrongType)?;
        let res = f(container);

        if container.is_empty() {
            self.entries.remove(key);
        }

        Ok(res)
    }

    /// Runs `f` on the collection of type `T` stored at `key`, or returns `None` when the key is
    /// absent. The key is removed if the collection is left empty.
    pub fn update<T, R>(
        &mut self,
        key: &[u8],
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<Option<R>, StoreError>
    where
        T: Container,
    {
        let Some(value) = self.get_mut(key) else {
            return Ok(None);
        };

        let container = T::from_value_mut(value).ok_or(StoreError::WrongType)?;
        let res = f(container);

        if container.is_empty() {
            self.entries.remove(key);
        }

        Ok(Some(res))
    }
}

/// The instant `ttl` from now. A TTL too large to represent never expires.
fn deadline(ttl: Duration) -> Option<Instant> {
    Instant::now().checked_add(ttl)
}
