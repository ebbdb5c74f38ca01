//! `route` and `routes`: route table diagnostics.

use super::render;
use crate::OutputFormat;
use anyhow::{Context, Result};
use grc_core::{Action, ResourceUri};
use grc_explorer::explorer_routes;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Where a resource identifier is routed.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RouteReport {
    /// Identifier as parsed
    pub resource: String,
    /// Action carried in the query
    pub action: Option<Action>,
    /// Handler serving the path, `None` if nothing matches
    pub handler: Option<String>,
    /// Matching pattern
    pub pattern: Option<String>,
    /// Captured parameters
    pub params: BTreeMap<String, String>,
}

/// One row of the route table.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RouteEntry {
    /// Pattern text
    pub pattern: String,
    /// Handler bound to it
    pub handler: String,
}

/// Resolves `input` against the route table.
///
/// # Errors
///
/// Returns an error if `input` is not a valid identifier.
pub fn report(input: &str) -> Result<RouteReport> {
    let resource =
        ResourceUri::parse(input).with_context(|| format!("invalid resource '{input}'"))?;
    let table = explorer_routes()?;
    let matched = table.match_path(resource.path());
    debug!("{} matched: {}", resource, matched.is_some());

    Ok(match matched {
        Some(m) => RouteReport {
            resource: resource.to_string(),
            action: resource.action(),
            handler: Some(format!("{:?}", m.handler)),
            pattern: Some(m.pattern.to_string()),
            params: m
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        },
        None => RouteReport {
            resource: resource.to_string(),
            action: resource.action(),
            handler: None,
            pattern: None,
            params: BTreeMap::new(),
        },
    })
}

/// Runs `route`.
///
/// # Errors
///
/// Returns an error if `input` is not a valid identifier.
pub fn resolve(input: &str, format: OutputFormat) -> Result<String> {
    render(&report(input)?, format)
}

/// Runs `routes`.
///
/// # Errors
///
/// Returns an error if the table cannot be built.
pub fn list(format: OutputFormat) -> Result<String> {
    let table = explorer_routes()?;
    let entries: Vec<RouteEntry> = table
        .routes()
        .map(|(pattern, handler)| RouteEntry {
            pattern: pattern.to_string(),
            handler: format!("{handler:?}"),
        })
        .collect();
    render(&entries, format)
}
