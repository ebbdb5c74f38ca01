//! Ordered path-pattern routing.
//!
//! A [`RouteTable`] maps resource paths to handlers. Patterns are tried in
//! registration order and the first full match wins; there is no
//! specificity re-ordering, so the order routes are added in is part of the
//! table's contract.
//!
//! # Pattern grammar
//!
//! Each `/`-separated pattern segment is one of:
//!
//! - `literal` - must equal the path segment exactly
//! - `:name` - captures one path segment
//! - `:name(a|b)` - captures one path segment that must be `a` or `b`
//! - `:name*` - captures the rest of the path (possibly empty); must be last
//!
//! # Examples
//!
//! ```
//! use grc_vfs::RouteTable;
//!
//! let mut table = RouteTable::new();
//! table.add("/a/:x(b|c)", "first").unwrap();
//! table.add("/a/:y*", "second").unwrap();
//!
//! let m = table.match_path("/a/b").unwrap();
//! assert_eq!(*m.handler, "first");
//! assert_eq!(m.params.get("x"), Some("b"));
//!
//! let m = table.match_path("/a/d").unwrap();
//! assert_eq!(*m.handler, "second");
//! assert_eq!(m.params.get("y"), Some("d"));
//! ```

use crate::types::{Params, Result, RouteError};
use std::fmt;
use tracing::trace;

/// One parsed pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(String),
    OneOf { name: String, values: Vec<String> },
    Rest(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a pattern.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::InvalidPattern` if the pattern is not absolute,
    /// a capture has an empty or non-identifier name, an alternation is
    /// empty or unterminated, or a wildcard is not the last segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_vfs::RoutePattern;
    ///
    /// assert!(RoutePattern::parse("/:controller(gserver)/:category(config)/:name*").is_ok());
    /// assert!(RoutePattern::parse("/:rest*/tail").is_err());
    /// assert!(RoutePattern::parse("/:kind()").is_err());
    /// assert!(RoutePattern::parse("relative").is_err());
    /// ```
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if !pattern.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }

        let raw: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
        let mut segments = Vec::with_capacity(raw.len());

        for (index, seg) in raw.iter().enumerate() {
            let Some(body) = seg.strip_prefix(':') else {
                segments.push(Segment::Literal((*seg).to_string()));
                continue;
            };

            if let Some(name) = body.strip_suffix('*') {
                if index + 1 != raw.len() {
                    return Err(invalid("wildcard must be the last segment"));
                }
                segments.push(Segment::Rest(capture_name(name).ok_or_else(|| {
                    invalid("capture name must be a non-empty identifier")
                })?));
            } else if let Some((name, alternatives)) = body.split_once('(') {
                let name = capture_name(name)
                    .ok_or_else(|| invalid("capture name must be a non-empty identifier"))?;
                let alternatives = alternatives
                    .strip_suffix(')')
                    .ok_or_else(|| invalid("alternation must end with ')'"))?;
                let values: Vec<String> =
                    alternatives.split('|').map(str::to_string).collect();
                if values.iter().any(String::is_empty) {
                    return Err(invalid("alternation values must be non-empty"));
                }
                segments.push(Segment::OneOf { name, values });
            } else {
                segments.push(Segment::Capture(capture_name(body).ok_or_else(|| {
                    invalid("capture name must be a non-empty identifier")
                })?));
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// Returns the pattern text as registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Matches `path` against this pattern, returning the captured
    /// parameters on success.
    ///
    /// Empty path segments are ignored, so `/gserver/` and `/gserver` match
    /// the same patterns.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_vfs::RoutePattern;
    ///
    /// let pattern = RoutePattern::parse("/:controller(gserver)/:category(filebrowser)/:path*").unwrap();
    ///
    /// let params = pattern.matches("/gserver/filebrowser/levels/town.nw").unwrap();
    /// assert_eq!(params.get("path"), Some("levels/town.nw"));
    ///
    /// let params = pattern.matches("/gserver/filebrowser").unwrap();
    /// assert_eq!(params.get("path"), Some(""));
    ///
    /// assert!(pattern.matches("/gserver/config").is_none());
    /// ```
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = Params::new();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Rest(name) => {
                    let rest = parts.get(index..).unwrap_or_default();
                    params.insert(name.as_str(), rest.join("/"));
                    return Some(params);
                }
                Segment::Literal(literal) => {
                    if *parts.get(index)? != literal.as_str() {
                        return None;
                    }
                }
                Segment::Capture(name) => params.insert(name.as_str(), *parts.get(index)?),
                Segment::OneOf { name, values } => {
                    let part = *parts.get(index)?;
                    if !values.iter().any(|v| v == part) {
                        return None;
                    }
                    params.insert(name.as_str(), part);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn capture_name(name: &str) -> Option<String> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then(|| name.to_string())
}

/// A successful route lookup.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// Handler bound to the matching pattern
    pub handler: &'a H,
    /// The pattern that matched
    pub pattern: &'a RoutePattern,
    /// Parameters captured from the path
    pub params: Params,
}

/// Ordered pattern-to-handler table with first-match-wins lookup.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<(RoutePattern, H)>,
}

impl<H> RouteTable<H> {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Appends a route; it is tried after every route added before it.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::InvalidPattern` if the pattern cannot be parsed.
    pub fn add(&mut self, pattern: &str, handler: H) -> Result<()> {
        let pattern = RoutePattern::parse(pattern)?;
        self.routes.push((pattern, handler));
        Ok(())
    }

    /// Builder-style variant of [`RouteTable::add`].
    ///
    /// # Errors
    ///
    /// Returns `RouteError::InvalidPattern` if the pattern cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_vfs::RouteTable;
    ///
    /// let table = RouteTable::new()
    ///     .route("/", 0)?
    ///     .route("/:controller(gserver)", 1)?;
    /// assert_eq!(table.len(), 2);
    /// # Ok::<(), grc_vfs::RouteError>(())
    /// ```
    pub fn route(mut self, pattern: &str, handler: H) -> Result<Self> {
        self.add(pattern, handler)?;
        Ok(self)
    }

    /// Finds the first route matching `path`.
    ///
    /// Returns `None` when no pattern matches; callers decide whether that
    /// means "empty listing" or "not found".
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_, H>> {
        let found = self.routes.iter().find_map(|(pattern, handler)| {
            pattern.matches(path).map(|params| RouteMatch {
                handler,
                pattern,
                params,
            })
        });

        match &found {
            Some(m) => trace!("Matched {} against {}", path, m.pattern),
            None => trace!("No route for {}", path),
        }

        found
    }

    /// Iterates over the registered patterns in order.
    pub fn patterns(&self) -> impl Iterator<Item = &RoutePattern> {
        self.routes.iter().map(|(pattern, _)| pattern)
    }

    /// Iterates over `(pattern, handler)` pairs in match order.
    pub fn routes(&self) -> impl Iterator<Item = (&RoutePattern, &H)> {
        self.routes.iter().map(|(pattern, handler)| (pattern, handler))
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::new()
            .route("/a/:x(b|c)", 1)
            .unwrap()
            .route("/a/:y*", 2)
            .unwrap();

        let m = table.match_path("/a/c").unwrap();
        assert_eq!(*m.handler, 1);
        assert_eq!(m.params.get("x"), Some("c"));
        assert_eq!(m.params.get("y"), None);

        let m = table.match_path("/a/d").unwrap();
        assert_eq!(*m.handler, 2);
        assert_eq!(m.params.get("y"), Some("d"));
    }

    #[test]
    fn test_registration_order_is_contract() {
        let table = RouteTable::new()
            .route("/a/:y*", 2)
            .unwrap()
            .route("/a/:x(b|c)", 1)
            .unwrap();

        // The wildcard shadows the alternation when registered first
        let m = table.match_path("/a/b").unwrap();
        assert_eq!(*m.handler, 2);
    }

    #[test]
    fn test_root_route() {
        let table = RouteTable::new().route("/", "index").unwrap();
        assert_eq!(*table.match_path("/").unwrap().handler, "index");
        assert!(table.match_path("/gserver").is_none());
    }

    #[test]
    fn test_exact_length_required_without_wildcard() {
        let pattern = RoutePattern::parse("/:controller(gserver)").unwrap();
        assert!(pattern.matches("/gserver").is_some());
        assert!(pattern.matches("/gserver/config").is_none());
        assert!(pattern.matches("/").is_none());
    }

    #[test]
    fn test_wildcard_may_be_empty() {
        let pattern = RoutePattern::parse("/x/:rest*").unwrap();
        assert_eq!(pattern.matches("/x").unwrap().get("rest"), Some(""));
        assert_eq!(pattern.matches("/x/").unwrap().get("rest"), Some(""));
        assert_eq!(pattern.matches("/x/a/b/c").unwrap().get("rest"), Some("a/b/c"));
    }

    #[test]
    fn test_wildcard_still_requires_prefix() {
        let pattern = RoutePattern::parse("/x/y/:rest*").unwrap();
        assert!(pattern.matches("/x").is_none());
    }

    #[test]
    fn test_alternation_is_case_sensitive() {
        let pattern = RoutePattern::parse("/:type(npcs|scripts|weapons)").unwrap();
        assert!(pattern.matches("/npcs").is_some());
        assert!(pattern.matches("/NPCS").is_none());
    }

    #[test]
    fn test_plain_capture() {
        let pattern = RoutePattern::parse("/players/:account").unwrap();
        let params = pattern.matches("/players/Stefan").unwrap();
        assert_eq!(params.get("account"), Some("Stefan"));
    }

    #[test]
    fn test_literal_mismatch() {
        let pattern = RoutePattern::parse("/gserver/config").unwrap();
        assert!(pattern.matches("/gserver/players").is_none());
    }

    #[test]
    fn test_invalid_patterns() {
        for bad in [
            "no-slash",
            "/:*",
            "/:rest*/more",
            "/:(a|b)",
            "/:x(a|b",
            "/:x(a||b)",
            "/:bad-name",
        ] {
            let err = RoutePattern::parse(bad).unwrap_err();
            assert!(err.is_invalid_pattern(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_patterns_listed_in_order() {
        let table = RouteTable::new()
            .route("/", ())
            .unwrap()
            .route("/:controller(npcserver)", ())
            .unwrap();
        let listed: Vec<_> = table.patterns().map(RoutePattern::as_str).collect();
        assert_eq!(listed, vec!["/", "/:controller(npcserver)"]);
    }

    #[test]
    fn test_routes_pair_patterns_with_handlers() {
        let table = RouteTable::new()
            .route("/", "index")
            .unwrap()
            .route("/:controller(gserver)", "gserver")
            .unwrap();
        let pairs: Vec<_> = table.routes().map(|(p, h)| (p.as_str(), *h)).collect();
        assert_eq!(pairs, vec![("/", "index"), ("/:controller(gserver)", "gserver")]);
    }

    #[test]
    fn test_empty_table() {
        let table: RouteTable<()> = RouteTable::default();
        assert!(table.is_empty());
        assert!(table.match_path("/").is_none());
    }
}
