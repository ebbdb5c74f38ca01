//! Collaborator traits.
//!
//! The explorer sits between two external parties it does not own:
//!
//! - `session` - the remote-control session (requests go out, pushed
//!   replies come back through [`SessionEvents`])
//! - `editor` - the host editor's windows, dialogs, tree view, and terminal
//!
//! Both are consumed as trait objects so the routing layer can be driven
//! by fakes in tests.

mod editor;
mod session;

pub use editor::EditorHost;
pub use session::{RemoteSession, ReplyTarget, SessionEvents};
