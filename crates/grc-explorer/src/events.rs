//! Session event sink.
//!
//! Pushed replies settle the matching pending read; connection changes
//! update the terminal and the view title.

use crate::explorer::ServerExplorer;
use async_trait::async_trait;
use grc_core::script::join_weapon_script;
use grc_core::{Error, ReplyTarget, SessionEvents};
use tracing::{debug, info, warn};

/// View title while connected to `server`.
#[must_use]
pub fn connected_title(server: &str) -> String {
    format!("RC (Connected to {server})")
}

/// View title while disconnected.
pub const DISCONNECTED_TITLE: &str = "RC (Disconnected)";

/// Formats a chat line for the terminal, prefixed with the local time when
/// `timestamp` is set.
#[must_use]
pub fn format_chat(text: &str, timestamp: bool) -> String {
    if timestamp {
        format!("[{}] {text}", chrono::Local::now().format("%H:%M:%S"))
    } else {
        text.to_string()
    }
}

impl ServerExplorer {
    fn settle(&self, target: &ReplyTarget, content: &str) {
        let key = target.resource().key();
        if !self.context().pending().resolve(&key, content.as_bytes().to_vec()) {
            debug!("Unsolicited reply for {}", key);
        }
    }

    fn write_chat(&self, text: &str) {
        let line = format_chat(text, self.context().config().enable_timestamp);
        self.context().editor().write_terminal(&line);
    }
}

#[async_trait]
impl SessionEvents for ServerExplorer {
    async fn on_connected(&self, server_name: &str) {
        info!("Connected to {}", server_name);
        let ctx = self.context();
        let editor = ctx.editor();

        editor.set_view_title(&connected_title(server_name));
        editor.write_terminal(&format!("RC Connected / Authenticated to {server_name}"));

        if let Some(nickname) = &ctx.config().nickname
            && let Some(session) = ctx.session()
            && let Err(err) = session.set_nickname(nickname).await
        {
            warn!("Failed to set nickname: {}", err);
        }

        editor.refresh_tree();
    }

    fn on_disconnected(&self, reason: Option<&str>) {
        info!("Disconnected: {}", reason.unwrap_or("no reason given"));
        self.detach_session();

        let editor = self.context().editor();
        editor.write_terminal("You have been disconnected.");
        if let Some(reason) = reason {
            editor.write_terminal(&format!("Reason: {reason}"));
        }
        editor.set_view_title(DISCONNECTED_TITLE);
        editor.refresh_tree();
    }

    async fn on_nc_connected(&self) {
        info!("NPC-server connected");
        let ctx = self.context();
        let Some(session) = ctx.session() else {
            return;
        };

        // Warm the cache so the first weapon listing is instant
        ctx.weapons().refresh();
        let fetched = ctx
            .weapons()
            .entries(move || async move { session.request_weapon_list().await })
            .await;
        match fetched {
            Ok(entries) => debug!("Prefetched {} weapons", entries.len()),
            Err(err) => warn!("Failed to prefetch weapons: {}", err),
        }
        ctx.editor().refresh_tree();
    }

    fn on_nc_disconnected(&self) {
        info!("NPC-server disconnected");
        self.context().weapons().invalidate();
        self.context().editor().refresh_tree();
    }

    fn on_rc_chat(&self, text: &str) {
        self.write_chat(text);
    }

    fn on_nc_chat(&self, text: &str) {
        self.write_chat(text);
    }

    fn on_npc_script(&self, name: &str, script: &str) {
        self.settle(&ReplyTarget::NpcScript(name.to_string()), script);
    }

    fn on_npc_attributes(&self, name: &str, attributes: &str) {
        self.settle(&ReplyTarget::NpcAttributes(name.to_string()), attributes);
    }

    fn on_npc_flags(&self, name: &str, flags: &str) {
        self.settle(&ReplyTarget::NpcFlags(name.to_string()), flags);
    }

    fn on_class_script(&self, name: &str, script: &str) {
        self.settle(&ReplyTarget::Class(name.to_string()), script);
    }

    fn on_weapon_script(&self, name: &str, image: &str, script: &str) {
        self.settle(
            &ReplyTarget::Weapon(name.to_string()),
            &join_weapon_script(image, script),
        );
    }

    fn on_request_failed(&self, target: ReplyTarget, error: Error) {
        let key = target.resource().key();
        warn!("Request for {} failed: {}", key, error);
        if !self.context().pending().reject(&key, error) {
            debug!("No pending read for {}", key);
        }
    }
}
