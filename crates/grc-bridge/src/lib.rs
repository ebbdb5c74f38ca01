//! Bridges push-style session replies to awaitable reads.
//!
//! The remote session answers script, class, and weapon requests with
//! events rather than return values, and only hands out its weapon list as
//! a whole. This crate provides the two pieces the explorer needs to hide
//! that:
//!
//! - [`PendingRequests`] parks a read under its resource key until the
//!   matching reply event settles it
//! - [`WeaponListCache`] keeps one shared copy of the weapon list with
//!   single-flight fetching
//!
//! # Examples
//!
//! ```
//! use grc_bridge::{PendingRequests, WeaponListCache};
//! use std::time::Duration;
//!
//! let pending = PendingRequests::with_timeout(Some(Duration::from_secs(30)));
//! let cache = WeaponListCache::new();
//!
//! assert!(pending.is_empty());
//! assert!(!cache.is_populated());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod pending;
pub mod weapon_cache;

pub use pending::{PendingReply, PendingRequests, PendingStats};
pub use weapon_cache::{WeaponListCache, filter_by_prefix};
