//! `/gserver/config/...`: server configuration documents.

use super::Request;
use grc_core::{Action, ConfigKind, DisplayNode, ExplorerEntry, FileStat, ResourceType, Result};
use grc_vfs::build_nodes;
use tracing::{debug, warn};

fn kind(req: &Request<'_>) -> Option<ConfigKind> {
    ConfigKind::from_name(req.params.get_or_empty("name"))
}

pub fn list_children(req: &Request<'_>) -> Vec<DisplayNode> {
    let Some(session) = req.ctx.session() else {
        return Vec::new();
    };

    let entries: Vec<ExplorerEntry> = ConfigKind::ALL
        .into_iter()
        .filter(|k| *k != ConfigKind::NpcLevelList || session.has_npc_control())
        .map(|k| ExplorerEntry::new(k.as_str()).with_label(k.label()))
        .collect();

    build_nodes(ResourceType::File, req.resource.relative_path(), &entries)
}

pub fn stat(req: &Request<'_>) -> FileStat {
    if req.params.get_or_empty("name").is_empty() {
        return FileStat::directory();
    }

    match kind(req) {
        Some(k) if !k.is_writable() => FileStat::file().readonly(),
        _ => FileStat::file(),
    }
}

pub async fn read(req: &Request<'_>) -> Result<Vec<u8>> {
    let kind = kind(req).ok_or_else(|| req.not_found())?;
    let session = req.ctx.require_session(req.resource)?;

    debug!("Requesting {}", kind.as_str());
    let text = session.request_config(kind).await?;
    Ok(text.into_bytes())
}

pub async fn write(req: &Request<'_>, content: &[u8]) -> Result<()> {
    let kind = kind(req).ok_or_else(|| req.not_found())?;
    if !kind.is_writable() {
        warn!("Ignoring write to read-only {}", kind.as_str());
        return Ok(());
    }

    let session = req.ctx.require_session(req.resource)?;
    session
        .set_config(kind, &String::from_utf8_lossy(content))
        .await
}

pub async fn head(req: &Request<'_>) -> Result<()> {
    if req.resource.action() == Some(Action::Open) {
        req.ctx
            .editor()
            .show_document(&req.resource.without_query(), false)
            .await?;
    }
    Ok(())
}
