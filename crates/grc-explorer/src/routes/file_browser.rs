//! `/gserver/filebrowser/...`: the server's remote file browser.
//!
//! Text-like files open in the editor and can be saved back. Everything else
//! is downloaded to the local disk instead, and is never uploaded.

use super::Request;
use grc_core::{
    Action, BrowserEntryType, DisplayNode, Error, ExplorerEntry, FileStat, ResourceType, Result,
};
use grc_vfs::build_nodes;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extensions opened as text and accepted for upload.
pub const TEXT_EXTENSIONS: [&str; 4] = [".txt", ".nw", ".gani", ".json"];

/// Splits a browser path into its directory and file name.
fn split_path(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

/// Browser form of a directory: empty for the root, otherwise ending in `/`.
pub fn browser_dir(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}

fn is_text_file(name: &str) -> bool {
    name.rfind('.')
        .is_some_and(|dot| TEXT_EXTENSIONS.contains(&&name[dot..]))
}

pub async fn list_children(req: &Request<'_>) -> Result<Vec<DisplayNode>> {
    let Some(session) = req.ctx.session() else {
        return Ok(Vec::new());
    };
    let path = browser_dir(req.params.get_or_empty("path"));

    let listing = match req.ctx.config().listing_timeout() {
        Some(limit) => tokio::time::timeout(limit, session.browser_cd(&path))
            .await
            .map_err(|_| Error::Timeout {
                operation: format!("list {}", req.resource.key()),
                duration_secs: limit.as_secs(),
            })??,
        None => session.browser_cd(&path).await?,
    };

    let entries: Vec<ExplorerEntry> = listing
        .entries
        .into_iter()
        .map(|entry| {
            let is_directory = entry.entry_type == BrowserEntryType::Directory;
            ExplorerEntry::new(entry.name.as_str())
                .with_label(entry.name)
                .with_directory(is_directory)
        })
        .collect();

    Ok(build_nodes(
        ResourceType::Folder,
        req.resource.relative_path(),
        &entries,
    ))
}

pub fn stat(req: &Request<'_>) -> FileStat {
    if req.params.get_or_empty("path").is_empty() {
        FileStat::directory()
    } else {
        FileStat::file()
    }
}

pub async fn read(req: &Request<'_>) -> Result<Vec<u8>> {
    let session = req.ctx.require_session(req.resource)?;
    let (directory, name) = split_path(req.params.get_or_empty("path"));
    if name.is_empty() {
        return Err(req.not_found());
    }

    session.browser_cd(&browser_dir(directory)).await?;
    session.browser_get(name).await
}

pub async fn write(req: &Request<'_>, content: &[u8]) -> Result<()> {
    let (directory, name) = split_path(req.params.get_or_empty("path"));
    if !is_text_file(name) {
        warn!("Refusing to upload non-text file {}", req.resource);
        return Ok(());
    }

    let session = req.ctx.require_session(req.resource)?;
    session.browser_cd(&browser_dir(directory)).await?;
    session.browser_put(name, content).await
}

pub async fn head(req: &Request<'_>) -> Result<()> {
    if req.resource.action() != Some(Action::Open) {
        debug!("Ignoring head request for {}", req.resource);
        return Ok(());
    }

    let (_, name) = split_path(req.params.get_or_empty("path"));
    if is_text_file(name) {
        return req
            .ctx
            .editor()
            .show_document(&req.resource.without_query(), true)
            .await;
    }

    let Some(target) = save_target(req, name).await else {
        debug!("Save of {} cancelled", name);
        return Ok(());
    };

    let editor = req.ctx.editor();
    match save_to_disk(req, &target).await {
        Ok(()) => {
            info!("Saved {} to {}", name, target.display());
            editor.open_local(&target).await?;
            editor.show_info(&format!("Saved {name} to {}", target.display()));
        }
        Err(err) => editor.show_error(&err.to_string()),
    }
    Ok(())
}

/// Picks where a download goes: straight into the save directory when the
/// file is not there yet, otherwise wherever the user chooses.
async fn save_target(req: &Request<'_>, name: &str) -> Option<PathBuf> {
    let save_dir = req.ctx.config().save_dir.as_deref();
    let default_path = save_dir.map_or_else(|| PathBuf::from(name), |dir| dir.join(name));

    if save_dir.is_some() {
        let exists = tokio::fs::try_exists(&default_path).await.unwrap_or(true);
        if !exists {
            return Some(default_path);
        }
    }

    req.ctx.editor().show_save_dialog(&default_path).await
}

async fn save_to_disk(req: &Request<'_>, target: &Path) -> Result<()> {
    let content = read(req).await?;
    tokio::fs::write(target, content)
        .await
        .map_err(|e| Error::io(target.display().to_string(), e))
}
