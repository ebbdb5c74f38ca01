//! Server explorer for GraalScript remote control.
//!
//! Exposes a connected server's configuration, file browser, NPCs, class
//! scripts, and weapons to a host editor as a `grc:///` virtual filesystem
//! plus a tree view.
//!
//! # Architecture
//!
//! - [`ServerExplorer`] is the facade the editor talks to: filesystem
//!   operations, tree-view queries, commands, and terminal input
//! - [`routes`] maps request paths to the handler for each resource
//!   category
//! - [`ExplorerContext`] holds the state every handler shares: the session
//!   slot, the editor host, the pending-reply table, and the weapon cache
//! - The explorer implements [`grc_core::SessionEvents`], so the session
//!   pushes script replies and connection changes straight into it
//!
//! # Examples
//!
//! ```no_run
//! use grc_core::{EditorHost, ExplorerConfig, RemoteSession, SessionEvents};
//! use grc_explorer::ServerExplorer;
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     editor: Arc<dyn EditorHost>,
//! #     session: Arc<dyn RemoteSession>,
//! # ) -> grc_core::Result<()> {
//! let explorer = Arc::new(ServerExplorer::new(editor, ExplorerConfig::default())?);
//!
//! explorer.attach_session(session);
//! explorer.on_connected("Classic").await;
//!
//! for node in explorer.root_nodes().await? {
//!     println!("{}", node.display_label());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod commands;
mod events;
mod explorer;
mod terminal;

pub mod context;
pub mod routes;

pub use context::ExplorerContext;
pub use events::{DISCONNECTED_TITLE, connected_title, format_chat};
pub use explorer::ServerExplorer;
pub use routes::{RouteHandler, TEXT_EXTENSIONS, explorer_routes};
pub use terminal::{BackupSummary, TerminalCommand};
