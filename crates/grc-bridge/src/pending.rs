//! Pending-reply table.
//!
//! Script, class, and weapon fetches are push-style: the session sends a
//! request and the content arrives later as an event. [`PendingRequests`]
//! turns that into an awaitable read by parking a one-shot channel under the
//! resource's key until the matching event settles it.
//!
//! # Invariants
//!
//! - At most one entry per key. A started request for a key that is already
//!   pending settles the earlier reply with [`Error::Superseded`]; a request
//!   that fails to start leaves the earlier reply waiting.
//! - Every entry is settled exactly once; replies for unknown keys are
//!   dropped.
//! - The table lock is never held while a starter runs or while a caller
//!   awaits.
//!
//! # Examples
//!
//! ```
//! use grc_bridge::PendingRequests;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let pending = PendingRequests::new();
//! let reply = pending.create_pending("grc:///npcserver/scripts/Shop", || Ok(()));
//!
//! assert!(pending.resolve("grc:///npcserver/scripts/Shop", b"//script".to_vec()));
//! assert_eq!(reply.wait().await.unwrap(), b"//script");
//! # }
//! ```

use grc_core::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

type Reply = Result<Vec<u8>>;

#[derive(Debug)]
struct Entry {
    generation: u64,
    sender: oneshot::Sender<Reply>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: Mutex<HashMap<String, Entry>>,
    next_generation: AtomicU64,

    // Statistics counters
    registered: AtomicU64,
    resolved: AtomicU64,
    rejected: AtomicU64,
    superseded: AtomicU64,
    timed_out: AtomicU64,
    dropped: AtomicU64,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes `key` only if it still belongs to `generation`.
    fn withdraw(&self, key: &str, generation: u64) -> Option<Entry> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.generation == generation => entries.remove(key),
            _ => None,
        }
    }

    fn settle(&self, key: &str, entry: Entry, reply: Reply) {
        if entry.sender.send(reply).is_err() {
            debug!("Reader for {} went away before its reply arrived", key);
        }
    }
}

/// Snapshot of pending-table activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PendingStats {
    /// Reads registered
    pub registered: u64,
    /// Reads settled with content
    pub resolved: u64,
    /// Reads settled with an error (starter failure, session error, clear)
    pub rejected: u64,
    /// Reads replaced by a newer read for the same key
    pub superseded: u64,
    /// Reads abandoned after the read timeout
    pub timed_out: u64,
    /// Replies that arrived with no matching read
    pub dropped: u64,
    /// Reads currently outstanding
    pub outstanding: usize,
}

/// Table of reads waiting on pushed replies, keyed by resource identifier.
///
/// Cloning is cheap and every clone shares the same table.
#[derive(Debug, Clone, Default)]
pub struct PendingRequests {
    inner: Arc<Inner>,
    read_timeout: Option<Duration>,
}

impl PendingRequests {
    /// Creates an empty table whose reads wait indefinitely.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table whose reads give up after `timeout`.
    ///
    /// `None` waits indefinitely.
    #[must_use]
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self {
            inner: Arc::default(),
            read_timeout: timeout,
        }
    }

    /// Returns the configured read timeout.
    #[must_use]
    pub const fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    /// Registers a read for `key`, then runs `starter` to send the request.
    ///
    /// The entry is in place while `starter` runs, so a reply delivered
    /// synchronously still reaches it. If `starter` fails, the entry is
    /// withdrawn, the returned reply yields that error immediately, and any
    /// read already waiting on `key` keeps waiting. Once `starter` succeeds,
    /// an earlier read for `key` is settled with [`Error::Superseded`].
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_bridge::PendingRequests;
    /// use grc_core::Error;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let pending = PendingRequests::new();
    /// let reply = pending.create_pending("grc:///npcserver/weapons/Bomb", || {
    ///     Err(Error::session("not connected to the NPC-server"))
    /// });
    ///
    /// assert!(reply.wait().await.unwrap_err().is_session_error());
    /// assert!(!pending.is_pending("grc:///npcserver/weapons/Bomb"));
    /// # }
    /// ```
    pub fn create_pending<F>(&self, key: impl Into<String>, starter: F) -> PendingReply
    where
        F: FnOnce() -> Result<()>,
    {
        let key = key.into();
        let (sender, receiver) = oneshot::channel();
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);

        let previous = self
            .inner
            .lock()
            .insert(key.clone(), Entry { generation, sender });
        self.inner.registered.fetch_add(1, Ordering::Relaxed);

        match starter() {
            Ok(()) => {
                if let Some(previous) = previous {
                    self.supersede(&key, previous);
                }
            }
            Err(err) => {
                debug!("Request for {} failed to start: {}", key, err);
                let withdrawn = self.inner.withdraw(&key, generation);
                if let Some(previous) = previous {
                    self.restore(&key, previous, withdrawn.is_some());
                }
                if let Some(entry) = withdrawn {
                    self.inner.rejected.fetch_add(1, Ordering::Relaxed);
                    self.inner.settle(&key, entry, Err(err));
                }
            }
        }

        PendingReply {
            key,
            generation,
            receiver,
            inner: Arc::clone(&self.inner),
            timeout: self.read_timeout,
        }
    }

    fn supersede(&self, key: &str, previous: Entry) {
        debug!("Read for {} superseded by a newer read", key);
        self.inner.superseded.fetch_add(1, Ordering::Relaxed);
        self.inner.settle(
            key,
            previous,
            Err(Error::Superseded {
                resource: key.to_string(),
            }),
        );
    }

    /// Puts back the read displaced by a request that failed to start.
    ///
    /// When the failed read was already answered, or a newer read took the
    /// key meanwhile, the displaced read is superseded instead.
    fn restore(&self, key: &str, previous: Entry, withdrawn: bool) {
        let displaced = {
            let mut entries = self.inner.lock();
            if withdrawn && !entries.contains_key(key) {
                entries.insert(key.to_string(), previous);
                None
            } else {
                Some(previous)
            }
        };
        match displaced {
            None => debug!("Read for {} restored after a failed request", key),
            Some(previous) => self.supersede(key, previous),
        }
    }

    /// Settles the read for `key` with `content`.
    ///
    /// Returns `false`, and drops the content, when nothing is waiting.
    pub fn resolve(&self, key: &str, content: Vec<u8>) -> bool {
        let Some(entry) = self.inner.lock().remove(key) else {
            warn!("Dropping reply for {} with no pending read", key);
            self.inner.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        };

        self.inner.resolved.fetch_add(1, Ordering::Relaxed);
        self.inner.settle(key, entry, Ok(content));
        true
    }

    /// Settles the read for `key` with `error`.
    ///
    /// Returns `false` when nothing is waiting.
    pub fn reject(&self, key: &str, error: Error) -> bool {
        let Some(entry) = self.inner.lock().remove(key) else {
            warn!("Dropping error for {} with no pending read: {}", key, error);
            self.inner.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        };

        self.inner.rejected.fetch_add(1, Ordering::Relaxed);
        self.inner.settle(key, entry, Err(error));
        true
    }

    /// Rejects every outstanding read with a clone of `error`.
    ///
    /// Returns the number of reads rejected.
    pub fn clear(&self, error: &Error) -> usize {
        let drained: Vec<(String, Entry)> = self.inner.lock().drain().collect();
        let count = drained.len();

        for (key, entry) in drained {
            self.inner.settle(&key, entry, Err(error.clone()));
        }

        if count > 0 {
            debug!("Rejected {} pending reads: {}", count, error);
            self.inner
                .rejected
                .fetch_add(u64::try_from(count).unwrap_or(u64::MAX), Ordering::Relaxed);
        }
        count
    }

    /// Returns `true` if a read for `key` is waiting.
    #[must_use]
    pub fn is_pending(&self, key: &str) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Number of outstanding reads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if no read is outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Captures a snapshot of the table's counters.
    #[must_use]
    pub fn stats(&self) -> PendingStats {
        let inner = &self.inner;
        PendingStats {
            registered: inner.registered.load(Ordering::Relaxed),
            resolved: inner.resolved.load(Ordering::Relaxed),
            rejected: inner.rejected.load(Ordering::Relaxed),
            superseded: inner.superseded.load(Ordering::Relaxed),
            timed_out: inner.timed_out.load(Ordering::Relaxed),
            dropped: inner.dropped.load(Ordering::Relaxed),
            outstanding: self.len(),
        }
    }
}

/// The awaitable side of a registered read.
#[derive(Debug)]
#[must_use = "a pending reply does nothing unless waited on"]
pub struct PendingReply {
    key: String,
    generation: u64,
    receiver: oneshot::Receiver<Reply>,
    inner: Arc<Inner>,
    timeout: Option<Duration>,
}

impl PendingReply {
    /// Key this read was registered under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Waits for the reply.
    ///
    /// # Errors
    ///
    /// Returns the error the read was rejected with, `Error::Timeout` if the
    /// read timeout expired first (the entry is withdrawn, so a late reply
    /// is dropped), or `Error::Unavailable` if the table went away.
    pub async fn wait(mut self) -> Result<Vec<u8>> {
        let received = match self.timeout {
            None => (&mut self.receiver).await,
            Some(limit) => match tokio::time::timeout(limit, &mut self.receiver).await {
                Ok(received) => received,
                Err(_) => return self.expire(limit),
            },
        };

        received.unwrap_or_else(|_| {
            Err(Error::Unavailable {
                resource: self.key.clone(),
            })
        })
    }

    fn expire(mut self, limit: Duration) -> Result<Vec<u8>> {
        if self.inner.withdraw(&self.key, self.generation).is_some() {
            warn!("Read for {} timed out after {:?}", self.key, limit);
            self.inner.timed_out.fetch_add(1, Ordering::Relaxed);
            return Err(Error::Timeout {
                operation: format!("read {}", self.key),
                duration_secs: limit.as_secs(),
            });
        }

        // Settled between the deadline and the withdrawal
        self.receiver.try_recv().unwrap_or_else(|_| {
            Err(Error::Unavailable {
                resource: self.key.clone(),
            })
        })
    }
}
