//! Core types, traits, and errors for the GRC server explorer.
//!
//! This crate provides the foundational types shared by the routing,
//! bridging, and explorer crates.
//!
//! # Architecture
//!
//! The core consists of:
//! - Resource identifiers (`ResourceUri`, `Action`)
//! - The display-node data model (`DisplayNode`, `ExplorerEntry`, `FileStat`)
//! - Error hierarchy with contextual information
//! - Collaborator traits for the remote session and the host editor
//! - Configuration (`ExplorerConfig`)
//! - Weapon script serialization (`script`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;
mod uri;

pub mod script;
pub mod traits;

pub use config::{CONFIG_DIR_NAME, ExplorerConfig, ExplorerConfigBuilder, MAX_TIMEOUT_SECS};
pub use error::{Error, Result};
pub use traits::{EditorHost, RemoteSession, ReplyTarget, SessionEvents};
pub use types::{
    BrowserEntry, BrowserEntryType, ConfigKind, DirectoryListing, DisplayNode, ExplorerEntry,
    FileStat, FileType, FolderType, OPEN_RESOURCE_COMMAND, ResourceType, TreeCommand, TreeItem,
};
pub use uri::{ATTRS_SUFFIX, Action, FLAGS_SUFFIX, ResourceUri, URI_SCHEME};
