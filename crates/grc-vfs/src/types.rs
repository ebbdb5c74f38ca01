//! Core types for route matching.
//!
//! # Examples
//!
//! ```
//! use grc_vfs::{Params, RouteError};
//!
//! let mut params = Params::new();
//! params.insert("type", "weapons");
//! assert_eq!(params.get("type"), Some("weapons"));
//! assert_eq!(params.get_or_empty("name"), "");
//!
//! let err = RouteError::InvalidPattern {
//!     pattern: "/:x*/y".to_string(),
//!     reason: "wildcard must be the last segment".to_string(),
//! };
//! assert!(err.is_invalid_pattern());
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while building a route table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Pattern does not follow the route grammar
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The rejected pattern
        pattern: String,
        /// Why it was rejected
        reason: String,
    },
}

impl RouteError {
    /// Returns `true` if this is an invalid pattern error.
    #[must_use]
    pub const fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }
}

impl From<RouteError> for grc_core::Error {
    fn from(err: RouteError) -> Self {
        Self::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for route table construction.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Named parameters captured by a route match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns the value bound to `name`, or `""` when unbound.
    #[must_use]
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
