//! Error types for the GRC server explorer.
//!
//! One error enum is shared by every crate in the workspace so that a failure
//! raised deep inside a handler reaches the editor facade unchanged.
//!
//! # Examples
//!
//! ```
//! use grc_core::{Error, Result};
//!
//! fn read_config(name: &str) -> Result<String> {
//!     if name.is_empty() {
//!         return Err(Error::ResourceNotFound {
//!             resource: "grc:///gserver/config/".to_string(),
//!         });
//!     }
//!     Ok(String::new())
//! }
//!
//! let err = read_config("").unwrap_err();
//! assert!(err.is_not_found());
//! ```

use std::sync::Arc;
use thiserror::Error;

/// Main error type for the GRC server explorer.
///
/// The type is `Clone`: a single weapon-list fetch failure is delivered to
/// every request that was waiting on that fetch.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// No remote-control session is attached.
    ///
    /// Content reads and writes fail fast with this error before any
    /// routing takes place.
    #[error("Session unavailable: {resource}")]
    Unavailable {
        /// Identifier of the resource that was requested
        resource: String,
    },

    /// Resource not found error.
    ///
    /// Returned when no route matches a content request, or when the
    /// matched handler has no such sub-resource.
    #[error("Resource not found: {resource}")]
    ResourceNotFound {
        /// Identifier of the missing resource
        resource: String,
    },

    /// The resource is read-only.
    #[error("Resource is read-only: {resource}")]
    NoPermissions {
        /// Identifier of the read-only resource
        resource: String,
    },

    /// The operation is not supported for this resource category.
    #[error("{operation} is not supported for {resource}")]
    Unsupported {
        /// Human readable operation name
        operation: String,
        /// Identifier of the resource
        resource: String,
    },

    /// A newer read for the same identifier replaced this one.
    #[error("Request superseded by a newer read: {resource}")]
    Superseded {
        /// Identifier of the superseded read
        resource: String,
    },

    /// Timeout error.
    ///
    /// Occurs when a listing or read exceeds its configured timeout.
    #[error("Operation timed out after {duration_secs}s: {operation}")]
    Timeout {
        /// Name of the operation that timed out
        operation: String,
        /// Duration in seconds before timeout occurred
        duration_secs: u64,
    },

    /// The remote session reported a failure.
    #[error("Session request failed: {message}")]
    Session {
        /// Description of the failure
        message: String,
        /// Underlying error cause
        #[source]
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    /// Identifier could not be parsed.
    #[error("Invalid resource identifier '{uri}': {reason}")]
    InvalidUri {
        /// The rejected identifier
        uri: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid or cannot be parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Local filesystem error (config file, save-to-disk).
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: String,
        /// Underlying I/O error
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl Error {
    /// Creates a session error from a message.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::Error;
    ///
    /// let err = Error::session("weapon list request rejected");
    /// assert!(err.is_session_error());
    /// ```
    #[must_use]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an I/O error for `path`.
    #[must_use]
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Returns `true` if no session was attached.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::Error;
    ///
    /// let err = Error::Unavailable {
    ///     resource: "grc:///npcserver/npcs/Bob".to_string(),
    /// };
    /// assert!(err.is_unavailable());
    /// ```
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Returns `true` if this is a resource not found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::Error;
    ///
    /// let err = Error::ResourceNotFound {
    ///     resource: "grc:///gserver/config/nope".to_string(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Returns `true` if the resource is read-only.
    #[must_use]
    pub const fn is_no_permissions(&self) -> bool {
        matches!(self, Self::NoPermissions { .. })
    }

    /// Returns `true` if the operation is unsupported for the resource.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Returns `true` if a newer read replaced this one.
    #[must_use]
    pub const fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }

    /// Returns `true` if this is a timeout error.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::Error;
    ///
    /// let err = Error::Timeout {
    ///     operation: "filebrowser listing".to_string(),
    ///     duration_secs: 5,
    /// };
    /// assert!(err.is_timeout());
    /// ```
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if the remote session reported the failure.
    #[must_use]
    pub const fn is_session_error(&self) -> bool {
        matches!(self, Self::Session { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }
}

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let err = Error::Unavailable {
            resource: "grc:///gserver/config/serverflags".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Session unavailable: grc:///gserver/config/serverflags"
        );
        assert!(err.is_unavailable());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_unsupported_display() {
        let err = Error::Unsupported {
            operation: "Deleting NPCs".to_string(),
            resource: "grc:///npcserver/npcs/Bob".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Deleting NPCs is not supported for grc:///npcserver/npcs/Bob"
        );
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_session_error_source() {
        use std::error::Error as _;

        let io = std::io::Error::other("socket closed");
        let err = Error::Session {
            message: "request failed".to_string(),
            source: Some(Arc::new(io)),
        };
        assert!(err.source().is_some());
        assert!(Error::session("plain").source().is_none());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = Error::io("/tmp/x", std::io::Error::other("denied"));
        assert_eq!(err.to_string(), "I/O error on /tmp/x: denied");
    }

    #[test]
    fn test_error_is_clone() {
        let err = Error::Timeout {
            operation: "weapon list".to_string(),
            duration_secs: 5,
        };
        let copy = err.clone();
        assert!(copy.is_timeout());
        assert_eq!(copy.to_string(), err.to_string());
    }
}
