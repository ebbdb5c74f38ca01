//! Conversion of flat listings into display nodes.
//!
//! # Examples
//!
//! ```
//! use grc_core::{ExplorerEntry, ResourceType};
//! use grc_vfs::build_nodes;
//!
//! let entries = vec![
//!     ExplorerEntry::new("Bomb"),
//!     ExplorerEntry::new("-System/Login"),
//!     ExplorerEntry::new("-System/Logout"),
//! ];
//! let nodes = build_nodes(ResourceType::Weapon, "npcserver/weapons", &entries);
//!
//! assert_eq!(nodes.len(), 2);
//! assert_eq!(nodes[0].resource.path(), "/npcserver/weapons/Bomb");
//! assert_eq!(nodes[1].resource.path(), "/npcserver/weapons/-System/");
//! assert_eq!(nodes[1].kind, ResourceType::WeaponFolder);
//! ```

use grc_core::{DisplayNode, ExplorerEntry, FolderType, ResourceType, ResourceUri};
use std::collections::HashSet;

/// Builds display nodes for the children of `prefix`.
///
/// `prefix` is the parent path without its leading `/`; a trailing `/` is
/// added when it is non-empty and lacks one. Each entry's `kind`, `label`,
/// `folder_type` and `is_directory` override the listing defaults, and
/// `is_directory` otherwise follows `kind == Folder`.
///
/// When `kind` is [`ResourceType::Weapon`], entries whose name contains a
/// `/` collapse into one [`ResourceType::WeaponFolder`] node per leading
/// segment, in first-seen order.
#[must_use]
pub fn build_nodes(kind: ResourceType, prefix: &str, entries: &[ExplorerEntry]) -> Vec<DisplayNode> {
    let prefix = normalize_prefix(prefix);
    let mut seen_folders = HashSet::new();
    let mut nodes = Vec::with_capacity(entries.len());

    for entry in entries {
        if kind == ResourceType::Weapon
            && let Some((folder, _)) = entry.resource.split_once('/')
        {
            if seen_folders.insert(folder) {
                nodes.push(weapon_folder_node(&prefix, folder));
            }
            continue;
        }

        let node_kind = entry.kind.unwrap_or(kind);
        nodes.push(DisplayNode {
            resource: ResourceUri::from_path(format!("/{prefix}{}", entry.resource)),
            kind: node_kind,
            folder_type: entry.folder_type,
            label: entry.label.clone(),
            is_directory: entry
                .is_directory
                .unwrap_or(node_kind == ResourceType::Folder),
        });
    }

    nodes
}

fn weapon_folder_node(prefix: &str, folder: &str) -> DisplayNode {
    DisplayNode {
        resource: ResourceUri::from_path(format!("/{prefix}{folder}/")),
        kind: ResourceType::WeaponFolder,
        folder_type: Some(FolderType::WeaponList),
        label: Some(folder.to_string()),
        is_directory: true,
    }
}

fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}

/// Sorts names case-insensitively, keeping the original spelling.
///
/// Names differing only in case keep their relative order.
///
/// # Examples
///
/// ```
/// let mut names = vec!["bob".to_string(), "Alice".to_string(), "carl".to_string()];
/// grc_vfs::sort_case_insensitive(&mut names);
/// assert_eq!(names, ["Alice", "bob", "carl"]);
/// ```
pub fn sort_case_insensitive(names: &mut [String]) {
    names.sort_by_cached_key(|name| name.to_lowercase());
}

/// Sorts entries case-insensitively by their resource name.
pub fn sort_entries_case_insensitive(entries: &mut [ExplorerEntry]) {
    entries.sort_by_cached_key(|entry| entry.resource.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<ExplorerEntry> {
        names.iter().copied().map(ExplorerEntry::from).collect()
    }

    #[test]
    fn test_prefix_gets_trailing_slash() {
        let nodes = build_nodes(ResourceType::Script, "npcserver/scripts", &entries(&["Shop"]));
        assert_eq!(nodes[0].resource.path(), "/npcserver/scripts/Shop");

        let nodes = build_nodes(ResourceType::Script, "npcserver/scripts/", &entries(&["Shop"]));
        assert_eq!(nodes[0].resource.path(), "/npcserver/scripts/Shop");
    }

    #[test]
    fn test_empty_prefix() {
        let nodes = build_nodes(ResourceType::Folder, "", &entries(&["gserver"]));
        assert_eq!(nodes[0].resource.path(), "/gserver");
        assert!(nodes[0].is_directory);
    }

    #[test]
    fn test_entry_overrides() {
        let list = vec![
            ExplorerEntry::new("levels")
                .with_label("levels")
                .with_kind(ResourceType::File)
                .with_directory(true),
        ];
        let nodes = build_nodes(ResourceType::Folder, "gserver/filebrowser", &list);
        assert_eq!(nodes[0].kind, ResourceType::File);
        assert!(nodes[0].is_directory);
        assert_eq!(nodes[0].label.as_deref(), Some("levels"));
    }

    #[test]
    fn test_directory_defaults_follow_effective_kind() {
        let list = vec![ExplorerEntry::new("npcs").with_kind(ResourceType::Folder)];
        let nodes = build_nodes(ResourceType::File, "npcserver", &list);
        assert!(nodes[0].is_directory);
    }

    #[test]
    fn test_weapon_folders_deduplicated() {
        let nodes = build_nodes(
            ResourceType::Weapon,
            "npcserver/weapons",
            &entries(&["-A/x", "-A/y", "-B/z", "Bomb", "-A/deep/w"]),
        );
        let paths: Vec<_> = nodes.iter().map(|n| n.resource.path()).collect();
        assert_eq!(
            paths,
            vec![
                "/npcserver/weapons/-A/",
                "/npcserver/weapons/-B/",
                "/npcserver/weapons/Bomb",
            ]
        );
        assert!(nodes[0].is_directory);
        assert_eq!(nodes[0].folder_type, Some(FolderType::WeaponList));
        assert_eq!(nodes[0].label.as_deref(), Some("-A"));
        assert!(!nodes[2].is_directory);
    }

    #[test]
    fn test_non_weapon_kinds_keep_slashes() {
        let nodes = build_nodes(ResourceType::File, "gserver/filebrowser", &entries(&["a/b"]));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].resource.path(), "/gserver/filebrowser/a/b");
    }

    #[test]
    fn test_sort_entries() {
        let mut list = entries(&["zeta", "Alpha", "beta"]);
        sort_entries_case_insensitive(&mut list);
        let names: Vec<_> = list.iter().map(|e| e.resource.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    }
}
