//! `weapon split` and `weapon join`.

use super::{read_input, render};
use crate::OutputFormat;
use anyhow::Result;
use grc_core::script::{join_weapon_script, split_weapon_script};
use serde::Serialize;
use std::path::Path;

/// A weapon as the server stores it.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WeaponParts {
    /// Image file name
    pub image: String,
    /// Script text
    pub script: String,
}

/// Runs `weapon split`.
///
/// # Errors
///
/// Returns an error if the document cannot be read.
pub fn split(file: &Path, format: OutputFormat) -> Result<String> {
    let (image, script) = split_weapon_script(&read_input(file)?);
    render(&WeaponParts { image, script }, format)
}

/// Runs `weapon join`.
///
/// # Errors
///
/// Returns an error if the script cannot be read.
pub fn join(image: &str, file: &Path) -> Result<String> {
    Ok(join_weapon_script(image, &read_input(file)?))
}
