//! Tree-view commands.
//!
//! Commands are fire-and-forget from the editor's point of view: failures
//! are logged and surfaced as an error notification instead of returned.

use crate::explorer::ServerExplorer;
use grc_core::{ATTRS_SUFFIX, Action, DisplayNode, FLAGS_SUFFIX, ResourceType, ResourceUri, Result};
use tracing::{debug, warn};

impl ServerExplorer {
    fn report(&self, command: &str, result: Result<()>) {
        if let Err(err) = result {
            warn!("{} failed: {}", command, err);
            self.context().editor().show_error(&err.to_string());
        }
    }

    async fn run_action(&self, command: &str, resource: &ResourceUri, action: Action) {
        debug!("{} {}", command, resource);
        let result = self.head(&resource.with_action(action)).await;
        self.report(command, result);
    }

    /// Asks the tree view to re-query every node.
    pub fn refresh(&self) {
        self.context().weapons().refresh();
        self.context().editor().refresh_tree();
    }

    /// Reveals the active editor's document in the tree, if it is a
    /// `grc:///` resource.
    pub async fn reveal_active_resource(&self) {
        let editor = self.context().editor();
        let Some(resource) = editor.active_resource() else {
            return;
        };

        let node = DisplayNode::new(resource.without_query(), ResourceType::File);
        let result = editor.reveal(&node).await;
        self.report("reveal", result);
    }

    /// Opens a resource: text documents go to an editor, binary browser
    /// files are downloaded.
    pub async fn open_resource(&self, resource: &ResourceUri) {
        self.run_action("open", resource, Action::Open).await;
    }

    /// Opens an NPC's flags for editing.
    pub async fn edit_flags(&self, node: &DisplayNode) {
        self.show_variant("edit flags", node, FLAGS_SUFFIX).await;
    }

    /// Opens an NPC's attribute listing.
    pub async fn view_attributes(&self, node: &DisplayNode) {
        self.show_variant("view attributes", node, ATTRS_SUFFIX).await;
    }

    async fn show_variant(&self, command: &str, node: &DisplayNode, suffix: &str) {
        let resource = node.resource.without_query().with_suffix(suffix);
        debug!("{} {}", command, resource);
        let result = self
            .context()
            .editor()
            .show_document(&resource, false)
            .await;
        self.report(command, result);
    }

    /// Opens a node's script for editing.
    pub async fn edit_script(&self, node: &DisplayNode) {
        self.run_action("edit script", &node.resource, Action::Open)
            .await;
    }

    /// Deletes a node after confirmation.
    pub async fn delete_entry(&self, node: &DisplayNode) {
        self.run_action("delete", &node.resource, Action::Delete)
            .await;
    }

    /// Prompts for a name and creates an empty weapon under `node`.
    pub async fn create_weapon(&self, node: &DisplayNode) {
        self.run_action("create weapon", &node.resource, Action::CreateWeapon)
            .await;
    }

    /// Prompts for a name and creates an empty class script.
    pub async fn create_script(&self, node: &DisplayNode) {
        self.run_action("create script", &node.resource, Action::CreateScript)
            .await;
    }
}
