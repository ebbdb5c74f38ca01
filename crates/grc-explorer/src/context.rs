//! Shared state behind every explorer request.
//!
//! The context owns the session slot, the editor host, the configuration,
//! the pending-reply table, and the weapon-list cache. Handlers receive it
//! by reference; nothing in it is held across an `.await` except `Arc`
//! clones.

use grc_bridge::{PendingRequests, WeaponListCache};
use grc_core::{EditorHost, Error, ExplorerConfig, RemoteSession, Result};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// State shared by the filesystem provider, the tree view, and the
/// session event sink.
pub struct ExplorerContext {
    session: RwLock<Option<Arc<dyn RemoteSession>>>,
    editor: Arc<dyn EditorHost>,
    config: ExplorerConfig,
    pending: PendingRequests,
    weapons: WeaponListCache,
}

impl std::fmt::Debug for ExplorerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerContext")
            .field("session", &self.session().map(|s| s.server_name()))
            .field("editor", &"EditorHost{..}")
            .field("config", &self.config)
            .field("pending", &self.pending)
            .field("weapons", &self.weapons)
            .finish()
    }
}

impl ExplorerContext {
    /// Creates a context with no session attached.
    #[must_use]
    pub fn new(editor: Arc<dyn EditorHost>, config: ExplorerConfig) -> Self {
        let pending = PendingRequests::with_timeout(config.read_timeout());
        Self {
            session: RwLock::new(None),
            editor,
            config,
            pending,
            weapons: WeaponListCache::new(),
        }
    }

    /// Returns the attached session, if any.
    #[must_use]
    pub fn session(&self) -> Option<Arc<dyn RemoteSession>> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the attached session or an `Unavailable` error naming
    /// `resource`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unavailable` when no session is attached.
    pub fn require_session(
        &self,
        resource: impl std::fmt::Display,
    ) -> Result<Arc<dyn RemoteSession>> {
        self.session().ok_or_else(|| Error::Unavailable {
            resource: resource.to_string(),
        })
    }

    /// Attaches a session, replacing any previous one.
    ///
    /// Replies still pending for the previous session are rejected and the
    /// weapon cache is emptied.
    pub fn attach(&self, session: Arc<dyn RemoteSession>) {
        info!("Attaching session for {}", session.server_name());
        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(session);
        if previous.is_some() {
            self.reset("previous session");
        }
    }

    /// Detaches the current session.
    ///
    /// Pending reads are rejected with `Error::Unavailable` and the weapon
    /// cache is emptied. Returns the detached session.
    pub fn detach(&self) -> Option<Arc<dyn RemoteSession>> {
        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(session) = &previous {
            info!("Detached session for {}", session.server_name());
            self.reset("session");
        }
        previous
    }

    fn reset(&self, resource: &str) {
        self.weapons.invalidate();
        let rejected = self.pending.clear(&Error::Unavailable {
            resource: resource.to_string(),
        });
        if rejected > 0 {
            debug!("Rejected {} reads left by the {}", rejected, resource);
        }
    }

    /// The editor host.
    #[must_use]
    pub fn editor(&self) -> &dyn EditorHost {
        self.editor.as_ref()
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// The pending-reply table.
    #[must_use]
    pub const fn pending(&self) -> &PendingRequests {
        &self.pending
    }

    /// The weapon-list cache.
    #[must_use]
    pub const fn weapons(&self) -> &WeaponListCache {
        &self.weapons
    }
}
