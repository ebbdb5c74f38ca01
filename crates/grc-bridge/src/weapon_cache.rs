//! Shared weapon-list cache.
//!
//! The NPC-server only hands out its weapon list as a whole, so every weapon
//! folder listing is served from one cached copy. Concurrent listings that
//! arrive while a fetch is in flight await that same fetch instead of
//! starting another.
//!
//! ```text
//! Empty --entries()--> Fetching --ok--> Populated
//!   ^                     |                 |
//!   +------- error -------+                 |
//!   +------------- invalidate() ------------+
//!   +--------------- refresh() -------------+ (Populated only)
//! ```

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use grc_core::{ExplorerEntry, Result};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

type WeaponList = Arc<Vec<ExplorerEntry>>;
type SharedFetch = Shared<BoxFuture<'static, Result<WeaponList>>>;

enum Slot {
    Empty,
    Fetching { generation: u64, fetch: SharedFetch },
    Populated(WeaponList),
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Fetching { generation, .. } => f
                .debug_struct("Fetching")
                .field("generation", generation)
                .finish_non_exhaustive(),
            Self::Populated(list) => f.debug_tuple("Populated").field(&list.len()).finish(),
        }
    }
}

#[derive(Debug)]
struct State {
    slot: Slot,
    next_generation: u64,
}

/// Cache of the full weapon list with single-flight fetching.
///
/// Cloning is cheap and every clone shares the same slot.
///
/// # Examples
///
/// ```
/// use grc_bridge::WeaponListCache;
/// use grc_core::ExplorerEntry;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> grc_core::Result<()> {
/// let cache = WeaponListCache::new();
/// let fetch = || async {
///     Ok(vec![ExplorerEntry::new("Bomb"), ExplorerEntry::new("-System/Login")])
/// };
///
/// let system = cache.filtered("-System/", fetch).await?;
/// assert_eq!(system, vec![ExplorerEntry::new("Login")]);
/// assert!(cache.is_populated());
///
/// cache.invalidate();
/// assert!(!cache.is_populated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WeaponListCache {
    state: Arc<Mutex<State>>,
}

impl Default for WeaponListCache {
    fn default() -> Self {
        Self::new()
    }
}

impl WeaponListCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                slot: Slot::Empty,
                next_generation: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the full weapon list, fetching it with `fetch` if needed.
    ///
    /// `fetch` is only invoked when the cache is empty; callers arriving
    /// while a fetch is in flight share its result.
    ///
    /// # Errors
    ///
    /// Returns the fetch error. Every caller sharing the failed fetch gets a
    /// clone of the same error, and the cache is left empty.
    pub async fn entries<F, Fut>(&self, fetch: F) -> Result<WeaponList>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ExplorerEntry>>> + Send + 'static,
    {
        let (generation, shared) = {
            let mut guard = self.lock();
            let state = &mut *guard;
            match &state.slot {
                Slot::Populated(list) => return Ok(Arc::clone(list)),
                Slot::Fetching {
                    generation,
                    fetch: in_flight,
                } => (*generation, in_flight.clone()),
                Slot::Empty => {
                    let generation = state.next_generation;
                    state.next_generation += 1;
                    debug!("Fetching weapon list (generation {})", generation);

                    let shared = fetch().map(|res| res.map(Arc::new)).boxed().shared();
                    state.slot = Slot::Fetching {
                        generation,
                        fetch: shared.clone(),
                    };
                    (generation, shared)
                }
            }
        };

        let result = shared.await;
        self.settle(generation, &result);
        result
    }

    /// Moves a finished fetch into the slot, unless it was invalidated or
    /// replaced while in flight.
    fn settle(&self, generation: u64, result: &Result<WeaponList>) {
        let mut state = self.lock();
        let current = matches!(
            state.slot,
            Slot::Fetching { generation: g, .. } if g == generation
        );
        if !current {
            return;
        }

        state.slot = match result {
            Ok(list) => {
                debug!("Weapon list cached ({} entries)", list.len());
                Slot::Populated(Arc::clone(list))
            }
            Err(err) => {
                debug!("Weapon list fetch failed: {}", err);
                Slot::Empty
            }
        };
    }

    /// Returns the weapons below `prefix`, with the prefix stripped.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, as for [`WeaponListCache::entries`].
    pub async fn filtered<F, Fut>(&self, prefix: &str, fetch: F) -> Result<Vec<ExplorerEntry>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ExplorerEntry>>> + Send + 'static,
    {
        let list = self.entries(fetch).await?;
        Ok(filter_by_prefix(&list, prefix))
    }

    /// Empties the cache; the next listing fetches afresh.
    ///
    /// A fetch still in flight completes for its current awaiters but does
    /// not repopulate the cache.
    pub fn invalidate(&self) {
        let mut state = self.lock();
        if !matches!(state.slot, Slot::Empty) {
            debug!("Weapon list cache invalidated");
        }
        state.slot = Slot::Empty;
    }

    /// Drops a cached list so the next listing fetches afresh.
    ///
    /// A fetch in flight is left alone and keeps serving every caller, so
    /// reopening the weapons folder never starts a second fetch.
    pub fn refresh(&self) {
        let mut state = self.lock();
        if matches!(state.slot, Slot::Populated(_)) {
            debug!("Weapon list cache refreshed");
            state.slot = Slot::Empty;
        }
    }

    /// Returns `true` if a weapon list is cached.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        matches!(self.lock().slot, Slot::Populated(_))
    }

    /// Returns `true` if a fetch is in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        matches!(self.lock().slot, Slot::Fetching { .. })
    }
}

/// Selects the entries below `prefix` and strips it from their names.
///
/// Entries equal to the prefix itself are dropped, as are entries outside
/// it. An empty prefix selects everything.
///
/// # Examples
///
/// ```
/// use grc_bridge::filter_by_prefix;
/// use grc_core::ExplorerEntry;
///
/// let all: Vec<ExplorerEntry> = ["-A/x", "-A/", "-B/y", "z"].into_iter().map(Into::into).collect();
/// let names: Vec<_> = filter_by_prefix(&all, "-A/")
///     .into_iter()
///     .map(|e| e.resource)
///     .collect();
/// assert_eq!(names, ["x"]);
/// ```
#[must_use]
pub fn filter_by_prefix(entries: &[ExplorerEntry], prefix: &str) -> Vec<ExplorerEntry> {
    entries
        .iter()
        .filter(|entry| entry.resource != prefix)
        .filter_map(|entry| {
            entry.resource.strip_prefix(prefix).map(|rest| ExplorerEntry {
                resource: rest.to_string(),
                ..entry.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grc_core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn names(list: &[ExplorerEntry]) -> Vec<&str> {
        list.iter().map(|e| e.resource.as_str()).collect()
    }

    #[tokio::test]
    async fn test_populated_cache_skips_fetch() {
        let cache = WeaponListCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            cache
                .entries(move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![ExplorerEntry::new("Bomb")])
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_clears_slot() {
        let cache = WeaponListCache::new();
        let err = cache
            .entries(|| async { Err(Error::session("npc-server offline")) })
            .await
            .unwrap_err();
        assert!(err.is_session_error());
        assert!(!cache.is_populated());
        assert!(!cache.is_fetching());

        let list = cache
            .entries(|| async { Ok(vec![ExplorerEntry::new("Bomb")]) })
            .await
            .unwrap();
        assert_eq!(names(&list), vec!["Bomb"]);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = WeaponListCache::new();
        cache
            .entries(|| async { Ok(vec![ExplorerEntry::new("Old")]) })
            .await
            .unwrap();
        cache.invalidate();

        let list = cache
            .entries(|| async { Ok(vec![ExplorerEntry::new("New")]) })
            .await
            .unwrap();
        assert_eq!(names(&list), vec!["New"]);
    }

    #[tokio::test]
    async fn test_refresh_keeps_fetch_in_flight() {
        let cache = WeaponListCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (release, gate) = tokio::sync::oneshot::channel::<()>();

        let first = {
            let cache = cache.clone();
            let calls = Arc::clone(&calls);
            tokio::spawn(async move {
                cache
                    .entries(move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        let _ = gate.await;
                        Ok(vec![ExplorerEntry::new("Bomb")])
                    })
                    .await
            })
        };
        while !cache.is_fetching() {
            tokio::task::yield_now().await;
        }

        cache.refresh();
        assert!(cache.is_fetching());

        let second = {
            let cache = cache.clone();
            let calls = Arc::clone(&calls);
            tokio::spawn(async move {
                cache
                    .entries(move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(vec![ExplorerEntry::new("Other")])
                    })
                    .await
            })
        };
        tokio::task::yield_now().await;
        release.send(()).unwrap();

        assert_eq!(names(&first.await.unwrap().unwrap()), vec!["Bomb"]);
        assert_eq!(names(&second.await.unwrap().unwrap()), vec!["Bomb"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_populated());

        cache.refresh();
        assert!(!cache.is_populated());
    }

    #[test]
    fn test_filter_root_prefix() {
        let all: Vec<ExplorerEntry> = ["b", "-A/x"].into_iter().map(Into::into).collect();
        assert_eq!(names(&filter_by_prefix(&all, "")), vec!["b", "-A/x"]);
    }

    #[test]
    fn test_filter_keeps_entry_fields() {
        let all = vec![ExplorerEntry::new("-A/x").with_label("X")];
        let filtered = filter_by_prefix(&all, "-A/");
        assert_eq!(filtered[0].resource, "x");
        assert_eq!(filtered[0].label.as_deref(), Some("X"));
    }

    #[test]
    fn test_filter_nested_folders_stay_nested() {
        let all: Vec<ExplorerEntry> = ["-A/b/c", "-A/d"].into_iter().map(Into::into).collect();
        assert_eq!(names(&filter_by_prefix(&all, "-A/")), vec!["b/c", "d"]);
    }
}
