//! RC terminal input and file-browser backup.

use crate::explorer::ServerExplorer;
use crate::routes::browser_dir;
use grc_core::{BrowserEntryType, Error, RemoteSession, ResourceUri, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A line typed into the RC terminal.
///
/// # Examples
///
/// ```
/// use grc_explorer::TerminalCommand;
///
/// assert_eq!(TerminalCommand::parse(" /clear "), TerminalCommand::Clear);
/// assert_eq!(TerminalCommand::parse("/backup"), TerminalCommand::Backup);
/// assert_eq!(
///     TerminalCommand::parse("hello"),
///     TerminalCommand::Chat("hello".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// `/clear`: wipe the terminal
    Clear,
    /// `/backup`: mirror the file browser to a local folder
    Backup,
    /// Anything else is sent to the RC chat verbatim
    Chat(String),
}

impl TerminalCommand {
    /// Parses a terminal line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/clear" => Self::Clear,
            "/backup" => Self::Backup,
            _ => Self::Chat(line.to_string()),
        }
    }
}

/// What a backup copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackupSummary {
    /// Remote directories visited, including the root
    pub directories: usize,
    /// Files written
    pub files: usize,
    /// Bytes written
    pub bytes: u64,
}

/// Names that would escape the mirrored directory are skipped.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

impl ServerExplorer {
    /// Handles a line typed into the RC terminal.
    pub async fn on_terminal_input(&self, line: &str) {
        let ctx = self.context();
        match TerminalCommand::parse(line) {
            TerminalCommand::Clear => ctx.editor().clear_terminal(),
            TerminalCommand::Chat(text) => {
                let Some(session) = ctx.session() else {
                    warn!("Dropping chat line, no session attached");
                    return;
                };
                if let Err(err) = session.send_chat(&text).await {
                    warn!("Failed to send chat: {}", err);
                    ctx.editor().show_error(&err.to_string());
                }
            }
            TerminalCommand::Backup => {
                let Some(root) = ctx.editor().show_folder_dialog("Backup folder").await else {
                    debug!("Backup cancelled");
                    return;
                };
                if let Err(err) = self.backup_to(&root).await {
                    warn!("Backup to {} failed: {}", root.display(), err);
                }
            }
        }
    }

    /// Mirrors the remote file browser into `local_root`.
    ///
    /// Directories are visited depth-first starting at the browser root.
    /// Progress and the outcome are written to the terminal.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unavailable` without a session, or the first session
    /// or filesystem error; files copied before the failure stay on disk.
    pub async fn backup_to(&self, local_root: &Path) -> Result<BackupSummary> {
        let editor = self.context().editor();
        editor.write_terminal(&format!("Starting backup to {}...", local_root.display()));
        let result = match self
            .context()
            .require_session(ResourceUri::from_path("/gserver/filebrowser"))
        {
            Ok(session) => mirror(session.as_ref(), local_root, |line| {
                editor.write_terminal(line);
            })
            .await,
            Err(err) => Err(err),
        };

        match &result {
            Ok(summary) => {
                info!(
                    "Backup to {} done: {} files, {} bytes",
                    local_root.display(),
                    summary.files,
                    summary.bytes
                );
                editor.write_terminal("Backup completed successfully!");
            }
            Err(err) => editor.write_terminal(&format!("Backup failed: {err}")),
        }
        result
    }
}

async fn mirror(
    session: &dyn RemoteSession,
    local_root: &Path,
    progress: impl Fn(&str),
) -> Result<BackupSummary> {
    let mut summary = BackupSummary::default();
    let mut stack = vec![String::new()];

    while let Some(dir) = stack.pop() {
        progress(&format!("Scanning {}...", if dir.is_empty() { "/" } else { dir.as_str() }));
        let listing = session.browser_cd(&dir).await?;
        summary.directories += 1;

        let local_dir = local_root.join(&dir);
        create_dir(&local_dir).await?;

        let mut files = Vec::new();
        for entry in listing.entries {
            if !is_safe_name(&entry.name) {
                warn!("Skipping unsafe entry {:?} in {:?}", entry.name, dir);
                continue;
            }
            match entry.entry_type {
                BrowserEntryType::Directory => {
                    stack.push(browser_dir(&format!("{dir}{}", entry.name)));
                }
                BrowserEntryType::File => files.push(entry.name),
            }
        }

        for name in files {
            progress(&format!("Downloading {name}..."));
            session.browser_cd(&dir).await?;
            let content = session.browser_get(&name).await?;

            let target: PathBuf = local_dir.join(&name);
            tokio::fs::write(&target, &content)
                .await
                .map_err(|e| Error::io(target.display().to_string(), e))?;
            summary.files += 1;
            summary.bytes += u64::try_from(content.len()).unwrap_or(u64::MAX);
        }
    }

    Ok(summary)
}

async fn create_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| Error::io(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(TerminalCommand::parse("/clear"), TerminalCommand::Clear);
        assert_eq!(TerminalCommand::parse("  /backup\n"), TerminalCommand::Backup);
        assert_eq!(
            TerminalCommand::parse("/CLEAR"),
            TerminalCommand::Chat("/CLEAR".to_string())
        );
        assert_eq!(
            TerminalCommand::parse("/clear now"),
            TerminalCommand::Chat("/clear now".to_string())
        );
    }

    #[test]
    fn test_is_safe_name() {
        assert!(is_safe_name("town.nw"));
        assert!(is_safe_name("..hidden"));
        for name in ["", ".", "..", "a/b", "a\\b"] {
            assert!(!is_safe_name(name), "{name}");
        }
    }
}
