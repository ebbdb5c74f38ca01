//! Static folders: the tree root and the two controller roots.

use grc_core::{DisplayNode, ExplorerEntry, FolderType, ResourceType};
use grc_vfs::build_nodes;

/// Children of `grc:///`.
pub fn root_children() -> Vec<DisplayNode> {
    build_nodes(
        ResourceType::Folder,
        "",
        &[
            ExplorerEntry::new("gserver").with_label("GServer"),
            ExplorerEntry::new("npcserver").with_label("NPC-Server"),
        ],
    )
}

/// Children of `grc:///gserver`.
pub fn gserver_children() -> Vec<DisplayNode> {
    build_nodes(
        ResourceType::Folder,
        "gserver",
        &[
            ExplorerEntry::new("config").with_label("Config"),
            ExplorerEntry::new("players").with_label("Players"),
            ExplorerEntry::new("filebrowser")
                .with_label("Filebrowser")
                .with_folder_type(FolderType::FileBrowser),
        ],
    )
}

/// Children of `grc:///npcserver`.
pub fn npcserver_children() -> Vec<DisplayNode> {
    build_nodes(
        ResourceType::Folder,
        "npcserver",
        &[
            ExplorerEntry::new("npcs")
                .with_label("NPCs")
                .with_folder_type(FolderType::NpcList),
            ExplorerEntry::new("scripts")
                .with_label("Scripts")
                .with_folder_type(FolderType::ScriptList),
            ExplorerEntry::new("weapons")
                .with_label("Weapons")
                .with_folder_type(FolderType::WeaponList),
        ],
    )
}
