//! Display-node data model and shared value types.
//!
//! Display nodes are rebuilt on every listing request; nothing here is
//! persisted between requests.
//!
//! # Examples
//!
//! ```
//! use grc_core::{DisplayNode, ResourceType, ResourceUri};
//!
//! let node = DisplayNode::new(
//!     ResourceUri::from_path("/npcserver/weapons/Bomb"),
//!     ResourceType::Weapon,
//! );
//! assert!(!node.is_directory);
//! assert_eq!(node.kind.context_value(), "weapons");
//! ```

use crate::uri::ResourceUri;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// Command the editor runs when a leaf node is activated.
pub const OPEN_RESOURCE_COMMAND: &str = "serverExplorerView.openResource";

/// Kind of resource a display node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Plain file (config entry, file-browser file).
    File,
    /// Plain folder.
    Folder,
    /// A live NPC.
    Npc,
    /// A class script.
    Script,
    /// A weapon.
    Weapon,
    /// Folder synthesized from weapon names containing `/`.
    WeaponFolder,
}

impl ResourceType {
    /// Returns the context value used by the editor's context menus.
    #[must_use]
    pub const fn context_value(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
            Self::Npc => "npcs",
            Self::Script => "scripts",
            Self::Weapon => "weapons",
            Self::WeaponFolder => "weaponsfolder",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.context_value())
    }
}

/// Sub-classification of folder nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderType {
    /// Remote file browser root.
    FileBrowser,
    /// Live NPC listing.
    NpcList,
    /// Weapon listing.
    WeaponList,
    /// Class script listing.
    ScriptList,
}

/// A flat listing entry before it is turned into a display node.
///
/// Entries are either bare names (`"Bomb"`) or records overriding the
/// node's label, kind, or directory flag.
///
/// # Examples
///
/// ```
/// use grc_core::ExplorerEntry;
///
/// let bare: ExplorerEntry = "Bomb".into();
/// assert_eq!(bare.resource, "Bomb");
/// assert!(bare.label.is_none());
///
/// let labelled = ExplorerEntry::new("serverflags").with_label("Server Flags");
/// assert_eq!(labelled.label.as_deref(), Some("Server Flags"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerEntry {
    /// Path relative to the listing prefix
    pub resource: String,
    /// Overrides the listing's node kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResourceType>,
    /// Overrides the folder type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_type: Option<FolderType>,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Overrides the directory flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_directory: Option<bool>,
}

impl ExplorerEntry {
    /// Creates an entry with only a resource name.
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the node kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: ResourceType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the folder type.
    #[must_use]
    pub const fn with_folder_type(mut self, folder_type: FolderType) -> Self {
        self.folder_type = Some(folder_type);
        self
    }

    /// Sets the directory flag.
    #[must_use]
    pub const fn with_directory(mut self, is_directory: bool) -> Self {
        self.is_directory = Some(is_directory);
        self
    }
}

impl From<&str> for ExplorerEntry {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ExplorerEntry {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for ExplorerEntry {
    fn from(s: &String) -> Self {
        Self::new(s.as_str())
    }
}

/// A node shown in the editor's tree view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayNode {
    /// Identifier of the resource
    pub resource: ResourceUri,
    /// Node kind
    pub kind: ResourceType,
    /// Folder sub-classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_type: Option<FolderType>,
    /// Display label; the editor falls back to the identifier's last segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the node can be expanded
    pub is_directory: bool,
}

impl DisplayNode {
    /// Creates a node; folders are directories, everything else is a leaf.
    #[must_use]
    pub fn new(resource: ResourceUri, kind: ResourceType) -> Self {
        Self {
            resource,
            kind,
            folder_type: None,
            label: None,
            is_directory: kind == ResourceType::Folder,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the directory flag.
    #[must_use]
    pub const fn with_directory(mut self, is_directory: bool) -> Self {
        self.is_directory = is_directory;
        self
    }

    /// Returns the label shown in the tree.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .or_else(|| self.resource.file_name())
            .unwrap_or("/")
    }

    /// Converts the node into the tree-view-facing item.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::{DisplayNode, ResourceType, ResourceUri, OPEN_RESOURCE_COMMAND};
    ///
    /// let leaf = DisplayNode::new(
    ///     ResourceUri::from_path("/npcserver/scripts/Shop"),
    ///     ResourceType::Script,
    /// );
    /// let item = leaf.tree_item();
    /// assert_eq!(item.label, "Shop");
    /// assert!(!item.collapsible);
    /// assert_eq!(item.command.unwrap().command, OPEN_RESOURCE_COMMAND);
    /// ```
    #[must_use]
    pub fn tree_item(&self) -> TreeItem {
        TreeItem {
            resource: self.resource.clone(),
            label: self.display_label().to_string(),
            collapsible: self.is_directory,
            context_value: self.kind.context_value(),
            command: (!self.is_directory).then(|| TreeCommand {
                command: OPEN_RESOURCE_COMMAND,
                title: "Open Resource",
                argument: self.resource.clone(),
            }),
        }
    }
}

/// Tree-view representation of a display node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeItem {
    /// Identifier of the resource
    pub resource: ResourceUri,
    /// Label shown in the tree
    pub label: String,
    /// Whether the item renders collapsed with an expander
    pub collapsible: bool,
    /// Context value driving the context menu
    pub context_value: &'static str,
    /// Command run on activation (leaves only)
    pub command: Option<TreeCommand>,
}

/// Editor command bound to a tree item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeCommand {
    /// Command identifier
    pub command: &'static str,
    /// Human-readable title
    pub title: &'static str,
    /// Argument passed to the command
    pub argument: ResourceUri,
}

/// Whether a stat result names a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    /// Regular file
    File,
    /// Directory
    Directory,
}

impl FileType {
    /// Returns true for regular files.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns true for directories.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// File metadata reported to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// File or directory
    pub file_type: FileType,
    /// Creation time
    pub ctime: SystemTime,
    /// Modification time
    pub mtime: SystemTime,
    /// Size in bytes (unknown remotely, reported as 0)
    pub size: u64,
    /// Whether the editor must treat the file as read-only
    pub readonly: bool,
}

impl FileStat {
    /// A writable file stamped with the current time.
    #[must_use]
    pub fn file() -> Self {
        let now = SystemTime::now();
        Self {
            file_type: FileType::File,
            ctime: now,
            mtime: now,
            size: 0,
            readonly: false,
        }
    }

    /// A directory stamped with the current time.
    #[must_use]
    pub fn directory() -> Self {
        Self {
            file_type: FileType::Directory,
            ..Self::file()
        }
    }

    /// Marks the stat read-only.
    #[must_use]
    pub const fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

/// Server configuration documents exposed under `/gserver/config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    /// Folder configuration
    FolderConfig,
    /// Server flags
    ServerFlags,
    /// Server options
    ServerOptions,
    /// NPC-server level list (read-only)
    NpcLevelList,
}

impl ConfigKind {
    /// All kinds, in listing order.
    pub const ALL: [Self; 4] = [
        Self::FolderConfig,
        Self::ServerFlags,
        Self::ServerOptions,
        Self::NpcLevelList,
    ];

    /// Path segment naming this document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FolderConfig => "folderconfig",
            Self::ServerFlags => "serverflags",
            Self::ServerOptions => "serveroptions",
            Self::NpcLevelList => "npclevellist",
        }
    }

    /// Label shown in the tree.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FolderConfig => "Folder Configuration",
            Self::ServerFlags => "Server Flags",
            Self::ServerOptions => "Server Options",
            Self::NpcLevelList => "NPC LevelList",
        }
    }

    /// Looks up a kind by its path segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::ConfigKind;
    ///
    /// assert_eq!(ConfigKind::from_name("serverflags"), Some(ConfigKind::ServerFlags));
    /// assert_eq!(ConfigKind::from_name("ServerFlags"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Whether edits are accepted.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::NpcLevelList)
    }
}

/// Type of a remote file-browser entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserEntryType {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// One entry of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserEntry {
    /// File or directory name
    pub name: String,
    /// Entry type
    pub entry_type: BrowserEntryType,
}

impl BrowserEntry {
    /// Creates a file entry.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: BrowserEntryType::File,
        }
    }

    /// Creates a directory entry.
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: BrowserEntryType::Directory,
        }
    }
}

/// Directory listing returned by the remote file browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// Directory the listing describes
    pub directory: String,
    /// Entries in server order
    pub entries: Vec<BrowserEntry>,
}
