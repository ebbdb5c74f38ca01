//! Remote-control session traits.
//!
//! Config and file-browser operations are request/response and are modelled
//! as `async fn`s. Script, class, and weapon fetches are push-style: the
//! `request_*` call only sends the request, and the content arrives later
//! through a [`SessionEvents`] callback.

use crate::error::{Error, Result};
use crate::types::{ConfigKind, DirectoryListing, ExplorerEntry};
use crate::uri::{ATTRS_SUFFIX, FLAGS_SUFFIX, ResourceUri};
use async_trait::async_trait;

/// Capability interface of an attached remote-control session.
///
/// All implementations must be `Send + Sync` to work with Tokio's async
/// runtime.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Name of the server the session is connected to.
    fn server_name(&self) -> String;

    /// Whether the session also controls the NPC-server.
    fn has_npc_control(&self) -> bool;

    /// Closes the session.
    async fn disconnect(&self);

    /// Sends a line to the RC chat.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be sent.
    async fn send_chat(&self, text: &str) -> Result<()>;

    /// Announces the nickname.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    async fn set_nickname(&self, nickname: &str) -> Result<()>;

    /// Fetches a server configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the request.
    async fn request_config(&self, kind: ConfigKind) -> Result<String>;

    /// Replaces a server configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the update.
    async fn set_config(&self, kind: ConfigKind, text: &str) -> Result<()>;

    /// Changes the file browser's working directory and returns its listing.
    ///
    /// `path` is in the browser's directory form: empty for the root,
    /// otherwise relative and ending in `/` (`levels/npcs/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    async fn browser_cd(&self, path: &str) -> Result<DirectoryListing>;

    /// Downloads a file from the browser's working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails.
    async fn browser_get(&self, name: &str) -> Result<Vec<u8>>;

    /// Uploads a file into the browser's working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    async fn browser_put(&self, name: &str, content: &[u8]) -> Result<()>;

    /// Names of the live NPCs currently known to the session.
    fn npc_names(&self) -> Vec<String>;

    /// Names of the class scripts currently known to the session.
    fn class_names(&self) -> Vec<String>;

    /// Fetches the full weapon list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be fetched.
    async fn request_weapon_list(&self) -> Result<Vec<ExplorerEntry>>;

    /// Requests an NPC's script; the reply arrives via
    /// [`SessionEvents::on_npc_script`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    fn request_npc_script(&self, name: &str) -> Result<()>;

    /// Requests an NPC's attributes; the reply arrives via
    /// [`SessionEvents::on_npc_attributes`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    fn request_npc_attributes(&self, name: &str) -> Result<()>;

    /// Requests an NPC's flags; the reply arrives via
    /// [`SessionEvents::on_npc_flags`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    fn request_npc_flags(&self, name: &str) -> Result<()>;

    /// Requests a class script; the reply arrives via
    /// [`SessionEvents::on_class_script`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    fn request_class(&self, name: &str) -> Result<()>;

    /// Requests a weapon; the reply arrives via
    /// [`SessionEvents::on_weapon_script`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    fn request_weapon(&self, name: &str) -> Result<()>;

    /// Uploads an NPC's script.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    async fn set_npc_script(&self, name: &str, script: &str) -> Result<()>;

    /// Uploads an NPC's flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    async fn set_npc_flags(&self, name: &str, flags: &str) -> Result<()>;

    /// Uploads a class script, creating the class if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    async fn set_class_script(&self, name: &str, script: &str) -> Result<()>;

    /// Uploads a weapon, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    async fn set_weapon_script(&self, name: &str, image: &str, script: &str) -> Result<()>;

    /// Deletes a class.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    async fn delete_class(&self, name: &str) -> Result<()>;

    /// Deletes a weapon.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    async fn delete_weapon(&self, name: &str) -> Result<()>;
}

/// The resource a pushed reply (or reply failure) belongs to.
///
/// # Examples
///
/// ```
/// use grc_core::ReplyTarget;
///
/// let target = ReplyTarget::NpcFlags("Bob".to_string());
/// assert_eq!(target.resource().to_string(), "grc:///npcserver/npcs/Bob.flags");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReplyTarget {
    /// An NPC's script
    NpcScript(String),
    /// An NPC's attributes
    NpcAttributes(String),
    /// An NPC's flags
    NpcFlags(String),
    /// A class script
    Class(String),
    /// A weapon
    Weapon(String),
}

impl ReplyTarget {
    /// Identifier under which the originating read was registered.
    #[must_use]
    pub fn resource(&self) -> ResourceUri {
        match self {
            Self::NpcScript(name) => ResourceUri::from_path(format!("/npcserver/npcs/{name}")),
            Self::NpcAttributes(name) => {
                ResourceUri::from_path(format!("/npcserver/npcs/{name}{ATTRS_SUFFIX}"))
            }
            Self::NpcFlags(name) => {
                ResourceUri::from_path(format!("/npcserver/npcs/{name}{FLAGS_SUFFIX}"))
            }
            Self::Class(name) => ResourceUri::from_path(format!("/npcserver/scripts/{name}")),
            Self::Weapon(name) => ResourceUri::from_path(format!("/npcserver/weapons/{name}")),
        }
    }
}

/// Push-style notifications delivered by the session.
///
/// Implemented by the explorer; the session calls these from whatever task
/// drives its connection. Only the connection callbacks are async, since
/// they issue follow-up requests.
#[async_trait]
pub trait SessionEvents: Send + Sync {
    /// The RC connection is authenticated.
    async fn on_connected(&self, server_name: &str);

    /// The RC connection closed.
    fn on_disconnected(&self, reason: Option<&str>);

    /// The NPC-server connection is up.
    async fn on_nc_connected(&self);

    /// The NPC-server connection closed.
    fn on_nc_disconnected(&self);

    /// A line of RC chat arrived.
    fn on_rc_chat(&self, text: &str);

    /// A line of NPC-server chat arrived.
    fn on_nc_chat(&self, text: &str);

    /// An NPC's script arrived.
    fn on_npc_script(&self, name: &str, script: &str);

    /// An NPC's attributes arrived.
    fn on_npc_attributes(&self, name: &str, attributes: &str);

    /// An NPC's flags arrived.
    fn on_npc_flags(&self, name: &str, flags: &str);

    /// A class script arrived.
    fn on_class_script(&self, name: &str, script: &str);

    /// A weapon arrived.
    fn on_weapon_script(&self, name: &str, image: &str, script: &str);

    /// The server answered a push-style request with an error.
    fn on_request_failed(&self, target: ReplyTarget, error: Error);
}
