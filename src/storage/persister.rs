//! Write-behind persistence.
//!
//! State changes are applied in memory first and then handed to a single
//! worker thread that owns the [`KeyValueStore`]. Commands are executed in
//! submission order, so successive writes to the same key commit in program
//! order and a read sees every write submitted before it.
//!
//! Each write returns a [`PendingWrite`] receipt. Callers that care about
//! durability wait on it (bounded by the configured timeout); the UI polls
//! it once per frame and reports failures without touching in-memory state.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam::channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::kv::{KeyValueStore, StorageError};

/// Default time to wait for a storage call to complete.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_millis(2000);

enum Command {
    Get {
        key: String,
        reply: Sender<Result<Option<String>, StorageError>>,
    },
    Set {
        key: String,
        value: String,
        reply: Sender<Result<(), StorageError>>,
    },
    Flush {
        reply: Sender<()>,
    },
    Shutdown,
}

/// Owns the worker thread; the last [`Persister`] clone shuts it down.
struct Worker {
    tx: Sender<Command>,
    handle: Option<JoinHandle<()>>,
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Queued writes ahead of the shutdown command still commit.
        let _ = self.tx.send(Command::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Storage worker panicked during shutdown");
            }
        }
    }
}

/// Handle to the persistence worker. Cheap to clone.
#[derive(Clone)]
pub struct Persister {
    tx: Sender<Command>,
    timeout: Duration,
    _worker: Arc<Worker>,
}

impl Persister {
    /// Spawn a worker that owns `store`, using the default timeout.
    pub fn spawn<S: KeyValueStore + 'static>(store: S) -> Result<Self, StorageError> {
        Self::with_timeout(store, DEFAULT_WRITE_TIMEOUT)
    }

    /// Spawn a worker that owns `store`, bounding every storage call by `timeout`.
    pub fn with_timeout<S: KeyValueStore + 'static>(
        store: S,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let (tx, rx) = unbounded();

        let handle = std::thread::Builder::new()
            .name("fittrack-storage".to_string())
            .spawn(move || run_worker(store, rx))
            .map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(Self {
            tx: tx.clone(),
            timeout,
            _worker: Arc::new(Worker {
                tx,
                handle: Some(handle),
            }),
        })
    }

    /// The timeout applied to storage calls.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Queue a write. Returns immediately.
    pub fn set(&self, key: &str, value: impl Into<String>) -> PendingWrite {
        let (reply, ack) = bounded(1);
        let submitted = Instant::now();

        let command = Command::Set {
            key: key.to_string(),
            value: value.into(),
            reply,
        };

        if self.tx.send(command).is_err() {
            tracing::error!(key, "Storage worker is gone, write dropped");
        }

        PendingWrite {
            key: key.to_string(),
            ack,
            deadline: submitted + self.timeout,
            timeout: self.timeout,
            refused: false,
        }
    }

    /// A receipt for a write that was not queued because the stored value
    /// under `key` was never read back and must not be overwritten.
    pub fn refuse(&self, key: &str) -> PendingWrite {
        tracing::warn!(key, "Not overwriting a value that could not be restored");
        let (_, ack) = bounded(1);
        PendingWrite {
            key: key.to_string(),
            ack,
            deadline: Instant::now(),
            timeout: self.timeout,
            refused: true,
        }
    }

    /// Serialize `value` as JSON and queue it.
    ///
    /// A value that fails to serialize yields a receipt that already holds the error.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> PendingWrite {
        match serde_json::to_string(value) {
            Ok(json) => self.set(key, json),
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to serialize value");
                let (reply, ack) = bounded(1);
                let _ = reply.send(Err(StorageError::from(e)));
                PendingWrite {
                    key: key.to_string(),
                    ack,
                    deadline: Instant::now() + self.timeout,
                    timeout: self.timeout,
                    refused: false,
                }
            }
        }
    }

    /// Read a value, waiting at most the configured timeout.
    pub fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let (reply, rx) = bounded(1);

        self.tx
            .send(Command::Get {
                key: key.to_string(),
                reply,
            })
            .map_err(|_| PersistenceError::Disconnected {
                key: key.to_string(),
            })?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result.map_err(|source| PersistenceError::Storage {
                key: key.to_string(),
                source,
            }),
            Err(RecvTimeoutError::Timeout) => Err(PersistenceError::Timeout {
                key: key.to_string(),
                after: self.timeout,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(PersistenceError::Disconnected {
                key: key.to_string(),
            }),
        }
    }

    /// Read a JSON value. A value that does not parse is reported as a storage error.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistenceError> {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| PersistenceError::Storage {
                    key: key.to_string(),
                    source: StorageError::from(e),
                }),
            None => Ok(None),
        }
    }

    /// Read a JSON value at startup.
    ///
    /// A stored value that does not parse is copied to [`backup_key`] first and
    /// then reported as absent, so the caller can start fresh and overwrite it.
    /// The copy is waited on; if it fails the read fails.
    pub fn restore_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistenceError> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                let backup = backup_key(key);
                tracing::warn!(key, backup = %backup, error = %e, "Stored value is unreadable, keeping a copy");
                self.set(&backup, raw).wait()?;
                Ok(None)
            }
        }
    }

    /// Block until every previously queued command has been executed.
    pub fn flush(&self) -> Result<(), PersistenceError> {
        let (reply, rx) = bounded(1);
        let key = "<flush>".to_string();

        self.tx
            .send(Command::Flush { reply })
            .map_err(|_| PersistenceError::Disconnected { key: key.clone() })?;

        match rx.recv_timeout(self.timeout) {
            Ok(()) => Ok(()),
            Err(RecvTimeoutError::Timeout) => Err(PersistenceError::Timeout {
                key,
                after: self.timeout,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(PersistenceError::Disconnected { key }),
        }
    }
}

/// Key that holds a copy of an unreadable value stored under `key`.
pub fn backup_key(key: &str) -> String {
    format!("{key}.unreadable")
}

fn run_worker<S: KeyValueStore>(store: S, rx: Receiver<Command>) {
    tracing::debug!("Storage worker started");

    for command in rx.iter() {
        match command {
            Command::Get { key, reply } => {
                let _ = reply.send(store.get(&key));
            }
            Command::Set { key, value, reply } => {
                let result = store.set(&key, &value);
                if let Err(e) = &result {
                    tracing::error!(key = %key, error = %e, "Failed to persist value");
                }
                // The receipt may already have been dropped.
                let _ = reply.send(result);
            }
            Command::Flush { reply } => {
                let _ = reply.send(());
            }
            Command::Shutdown => break,
        }
    }

    tracing::debug!("Storage worker stopped");
}

/// Receipt for a queued write.
#[must_use = "a pending write reports persistence failures only if it is checked"]
#[derive(Debug)]
pub struct PendingWrite {
    key: String,
    ack: Receiver<Result<(), StorageError>>,
    deadline: Instant,
    timeout: Duration,
    refused: bool,
}

impl PendingWrite {
    /// The key being written.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Block until the write commits or the timeout expires.
    pub fn wait(self) -> Result<(), PersistenceError> {
        if self.refused {
            return Err(PersistenceError::Unrestored { key: self.key });
        }
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        match self.ack.recv_timeout(remaining) {
            Ok(result) => result.map_err(|source| PersistenceError::Storage {
                key: self.key,
                source,
            }),
            Err(RecvTimeoutError::Timeout) => Err(PersistenceError::Timeout {
                key: self.key,
                after: self.timeout,
            }),
            Err(RecvTimeoutError::Disconnected) => {
                Err(PersistenceError::Disconnected { key: self.key })
            }
        }
    }

    /// Check without blocking. `None` means still in flight.
    pub fn poll(&self) -> Option<Result<(), PersistenceError>> {
        if self.refused {
            return Some(Err(PersistenceError::Unrestored {
                key: self.key.clone(),
            }));
        }
        match self.ack.try_recv() {
            Ok(result) => Some(result.map_err(|source| PersistenceError::Storage {
                key: self.key.clone(),
                source,
            })),
            Err(TryRecvError::Empty) if Instant::now() >= self.deadline => {
                Some(Err(PersistenceError::Timeout {
                    key: self.key.clone(),
                    after: self.timeout,
                }))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PersistenceError::Disconnected {
                key: self.key.clone(),
            })),
        }
    }
}

/// Wait on every receipt and collect the failures.
pub fn wait_all(writes: Vec<PendingWrite>) -> Vec<PersistenceError> {
    writes
        .into_iter()
        .filter_map(|write| write.wait().err())
        .collect()
}

/// Persistence errors. None of these are fatal: in-memory state stays authoritative.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to persist '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("Storage call for '{key}' did not complete within {after:?}")]
    Timeout { key: String, after: Duration },

    #[error("Storage worker unavailable while handling '{key}'")]
    Disconnected { key: String },

    #[error("Saved '{key}' could not be restored, so it was not overwritten")]
    Unrestored { key: String },
}

impl PersistenceError {
    /// The key the failed call was for.
    pub fn key(&self) -> &str {
        match self {
            PersistenceError::Storage { key, .. }
            | PersistenceError::Timeout { key, .. }
            | PersistenceError::Disconnected { key }
            | PersistenceError::Unrestored { key } => key,
        }
    }
}
