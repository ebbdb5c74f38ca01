//! Virtual filesystem plumbing for the GRC server explorer.
//!
//! Provides the ordered [`RouteTable`] that maps `grc:///` paths to
//! handlers, and [`build_nodes`] which turns flat server listings into
//! display nodes.
//!
//! # Examples
//!
//! ```
//! use grc_vfs::RouteTable;
//!
//! let table = RouteTable::new()
//!     .route("/:controller(npcserver)/:type(npcs|scripts|weapons)/:name*", "script")?;
//!
//! let m = table.match_path("/npcserver/weapons/-System/Bomb").unwrap();
//! assert_eq!(m.params.get("type"), Some("weapons"));
//! assert_eq!(m.params.get("name"), Some("-System/Bomb"));
//! # Ok::<(), grc_vfs::RouteError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod router;
pub mod tree;
pub mod types;

pub use router::{RouteMatch, RoutePattern, RouteTable};
pub use tree::{build_nodes, sort_case_insensitive, sort_entries_case_insensitive};
pub use types::{Params, Result, RouteError};
