//! Resource identifiers.
//!
//! Every resource the explorer exposes is named by a `grc:///` identifier of
//! the form `grc:///controller/category/name...`, optionally followed by a
//! query carrying an action verb (`?open`, `?delete`, `?createWeapon`,
//! `?createScript`).
//!
//! # Examples
//!
//! ```
//! use grc_core::{Action, ResourceUri};
//!
//! let uri = ResourceUri::parse("grc:///npcserver/weapons/Bomb?delete").unwrap();
//! assert_eq!(uri.path(), "/npcserver/weapons/Bomb");
//! assert_eq!(uri.action(), Some(Action::Delete));
//! assert_eq!(uri.to_string(), "grc:///npcserver/weapons/Bomb?delete");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// URI scheme used for every explorer resource.
pub const URI_SCHEME: &str = "grc";

/// Name suffix selecting an NPC's attribute listing (read-only).
pub const ATTRS_SUFFIX: &str = ".attrs";

/// Name suffix selecting an NPC's flags (writable).
pub const FLAGS_SUFFIX: &str = ".flags";

/// Action verb carried in an identifier's query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Open the resource in an editor (or save it to disk).
    Open,
    /// Delete the resource after confirmation.
    Delete,
    /// Prompt for a name and create an empty weapon.
    CreateWeapon,
    /// Prompt for a name and create an empty class script.
    CreateScript,
}

impl Action {
    /// Returns the query verb for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Delete => "delete",
            Self::CreateWeapon => "createWeapon",
            Self::CreateScript => "createScript",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(Self::Open),
            "delete" => Ok(Self::Delete),
            "createWeapon" => Ok(Self::CreateWeapon),
            "createScript" => Ok(Self::CreateScript),
            other => Err(Error::InvalidUri {
                uri: format!("?{other}"),
                reason: "unknown action".to_string(),
            }),
        }
    }
}

/// A parsed `grc:///` resource identifier.
///
/// Equality is structural: two identifiers are equal only if their paths
/// and queries are identical, including letter case.
///
/// # Examples
///
/// ```
/// use grc_core::ResourceUri;
///
/// let a = ResourceUri::from_path("/npcserver/scripts/Shop");
/// let b = ResourceUri::parse("grc:///npcserver/scripts/Shop").unwrap();
/// assert_eq!(a, b);
/// assert_ne!(a, ResourceUri::from_path("/npcserver/scripts/shop"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceUri {
    path: String,
    query: Option<String>,
}

impl ResourceUri {
    /// Parses an identifier.
    ///
    /// Accepts the full `grc:///path?query` form or a bare absolute path.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUri` if the scheme is not `grc` or the path is
    /// not absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::ResourceUri;
    ///
    /// assert!(ResourceUri::parse("grc:///gserver/config").is_ok());
    /// assert!(ResourceUri::parse("/gserver/config").is_ok());
    /// assert!(ResourceUri::parse("file:///etc/passwd").is_err());
    /// assert!(ResourceUri::parse("gserver").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let rest = match input.split_once("://") {
            Some((scheme, rest)) if scheme == URI_SCHEME => rest,
            Some((scheme, _)) => {
                return Err(Error::InvalidUri {
                    uri: input.to_string(),
                    reason: format!("unsupported scheme '{scheme}'"),
                });
            }
            None => input,
        };

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };

        if !path.starts_with('/') {
            return Err(Error::InvalidUri {
                uri: input.to_string(),
                reason: "path must be absolute".to_string(),
            });
        }

        Ok(Self {
            path: path.to_string(),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
        })
    }

    /// Builds an identifier from a path, adding the leading `/` if missing.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self { path, query: None }
    }

    /// The root identifier `grc:///`.
    #[must_use]
    pub fn root() -> Self {
        Self::from_path("/")
    }

    /// Returns the path component, always starting with `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path without its leading `/`.
    ///
    /// Used as the parent prefix when building child nodes.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.path[1..]
    }

    /// Returns the raw query string, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the action named by the query, if it is a known verb.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::{Action, ResourceUri};
    ///
    /// let uri = ResourceUri::parse("grc:///npcserver/weapons?createWeapon").unwrap();
    /// assert_eq!(uri.action(), Some(Action::CreateWeapon));
    ///
    /// let uri = ResourceUri::parse("grc:///npcserver/weapons?whatever").unwrap();
    /// assert_eq!(uri.action(), None);
    /// ```
    #[must_use]
    pub fn action(&self) -> Option<Action> {
        self.query.as_deref().and_then(|q| q.parse().ok())
    }

    /// Returns a copy carrying `action` as its query.
    #[must_use]
    pub fn with_action(&self, action: Action) -> Self {
        Self {
            path: self.path.clone(),
            query: Some(action.as_str().to_string()),
        }
    }

    /// Returns a copy without a query.
    #[must_use]
    pub fn without_query(&self) -> Self {
        Self {
            path: self.path.clone(),
            query: None,
        }
    }

    /// Returns a copy whose path has `suffix` appended verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::ResourceUri;
    ///
    /// let npc = ResourceUri::from_path("/npcserver/npcs/Bob");
    /// assert_eq!(npc.with_suffix(".flags").path(), "/npcserver/npcs/Bob.flags");
    /// ```
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            path: format!("{}{suffix}", self.path),
            query: None,
        }
    }

    /// Returns a child identifier below this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::ResourceUri;
    ///
    /// let base = ResourceUri::from_path("/gserver/config/");
    /// assert_eq!(base.join("serverflags").path(), "/gserver/config/serverflags");
    /// assert_eq!(ResourceUri::root().join("gserver").path(), "/gserver");
    /// ```
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        let base = self.path.trim_end_matches('/');
        Self {
            path: format!("{base}/{name}"),
            query: None,
        }
    }

    /// Iterates over the non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    /// Returns the last non-empty path segment.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Returns `true` if the path ends with `suffix`.
    #[must_use]
    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.path.ends_with(suffix)
    }

    /// Returns the identifier without its query as a string.
    ///
    /// This is the key pending reads are registered under.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{URI_SCHEME}://{}", self.path)
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{URI_SCHEME}://{}", self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

impl FromStr for ResourceUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ResourceUri {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ResourceUri> for String {
    fn from(uri: ResourceUri) -> Self {
        uri.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_form() {
        let uri = ResourceUri::parse("grc:///gserver/filebrowser/levels/a.nw?open").unwrap();
        assert_eq!(uri.path(), "/gserver/filebrowser/levels/a.nw");
        assert_eq!(uri.query(), Some("open"));
        assert_eq!(uri.action(), Some(Action::Open));
    }

    #[test]
    fn test_parse_empty_query_is_none() {
        let uri = ResourceUri::parse("grc:///gserver?").unwrap();
        assert_eq!(uri.query(), None);
        assert_eq!(uri.to_string(), "grc:///gserver");
    }

    #[test]
    fn test_parse_rejects_foreign_scheme() {
        let err = ResourceUri::parse("http:///gserver").unwrap_err();
        assert!(matches!(err, Error::InvalidUri { .. }));
    }

    #[test]
    fn test_parse_rejects_relative() {
        assert!(ResourceUri::parse("grc://gserver").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let text = "grc:///npcserver/npcs/Bob.flags";
        assert_eq!(ResourceUri::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn test_key_drops_query() {
        let uri = ResourceUri::parse("grc:///npcserver/scripts/Shop?open").unwrap();
        assert_eq!(uri.key(), "grc:///npcserver/scripts/Shop");
        assert_eq!(uri.without_query().to_string(), uri.key());
    }

    #[test]
    fn test_equality_is_structural() {
        let a = ResourceUri::parse("grc:///npcserver/weapons/a").unwrap();
        let b = ResourceUri::parse("grc:///npcserver/weapons/a?open").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, b.without_query());
    }

    #[test]
    fn test_segments_skip_empty() {
        let uri = ResourceUri::from_path("/npcserver//weapons/folder/");
        let segments: Vec<_> = uri.segments().collect();
        assert_eq!(segments, vec!["npcserver", "weapons", "folder"]);
        assert_eq!(uri.file_name(), Some("folder"));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(ResourceUri::root().relative_path(), "");
        assert_eq!(
            ResourceUri::from_path("gserver/config").relative_path(),
            "gserver/config"
        );
    }

    #[test]
    fn test_with_action() {
        let uri = ResourceUri::from_path("/npcserver/weapons/");
        assert_eq!(
            uri.with_action(Action::CreateWeapon).to_string(),
            "grc:///npcserver/weapons/?createWeapon"
        );
    }

    #[test]
    fn test_action_parse_unknown() {
        assert!("editflags".parse::<Action>().is_err());
        assert_eq!("createScript".parse::<Action>().unwrap(), Action::CreateScript);
    }
}
