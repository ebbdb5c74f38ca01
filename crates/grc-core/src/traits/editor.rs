//! Host editor trait.

use crate::error::Result;
use crate::types::DisplayNode;
use crate::uri::ResourceUri;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The editor surfaces the explorer drives.
///
/// Prompt methods return `None`/`false` when the user dismisses them; the
/// explorer treats that as a silent no-op.
#[async_trait]
pub trait EditorHost: Send + Sync {
    /// Opens a `grc:///` resource in a text editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to open the document.
    async fn show_document(&self, resource: &ResourceUri, preview: bool) -> Result<()>;

    /// Opens a local file with the editor's default handler.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    async fn open_local(&self, path: &Path) -> Result<()>;

    /// Asks the user for a line of text.
    async fn show_input_box(&self, prompt: &str) -> Option<String>;

    /// Asks a yes/no question; `true` means "Yes".
    async fn confirm(&self, message: &str) -> bool;

    /// Asks the user where to save a file.
    async fn show_save_dialog(&self, default_path: &Path) -> Option<PathBuf>;

    /// Asks the user to pick a local folder.
    async fn show_folder_dialog(&self, label: &str) -> Option<PathBuf>;

    /// Shows an informational notification.
    fn show_info(&self, message: &str);

    /// Shows an error notification.
    fn show_error(&self, message: &str);

    /// Asks the tree view to re-query its nodes.
    fn refresh_tree(&self);

    /// Updates the tree view's title.
    fn set_view_title(&self, title: &str);

    /// Writes a line to the RC terminal.
    fn write_terminal(&self, text: &str);

    /// Clears the RC terminal.
    fn clear_terminal(&self);

    /// Identifier of the document in the active editor, if any.
    fn active_resource(&self) -> Option<ResourceUri>;

    /// Reveals a node in the tree view.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be revealed.
    async fn reveal(&self, node: &DisplayNode) -> Result<()>;
}
