//! Command implementations for the diagnostics CLI.
//!
//! Each command returns the text to print; `main` owns stdout.

pub mod config;
pub mod route;
pub mod weapon;

use crate::OutputFormat;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Serializes a command result in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(data)?,
        OutputFormat::Json => serde_json::to_string(data)?,
    };
    Ok(text)
}

/// Reads a whole text input; `-` means stdin.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not UTF-8.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))
    }
}
