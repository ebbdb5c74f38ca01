//! In-memory session and editor used by the explorer integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use grc_core::{
    BrowserEntry, ConfigKind, DirectoryListing, DisplayNode, EditorHost, Error, ExplorerConfig,
    ExplorerEntry, RemoteSession, ResourceUri, Result, SessionEvents,
};
use grc_explorer::ServerExplorer;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

/// A scripted remote session.
///
/// Push-style requests are recorded; when an event sink is attached and
/// `auto_reply` is set, the matching reply is delivered synchronously from
/// the stored scripts, as a fast server would.
#[derive(Default)]
pub struct FakeSession {
    pub server: String,
    pub npc_control: bool,
    pub calls: Mutex<Vec<String>>,
    pub chats: Mutex<Vec<String>>,
    pub nickname: Mutex<Option<String>>,
    pub configs: Mutex<HashMap<String, String>>,
    pub npcs: Mutex<Vec<String>>,
    pub classes: Mutex<Vec<String>>,
    pub weapons: Mutex<Vec<ExplorerEntry>>,
    pub weapon_list_fetches: AtomicUsize,
    pub scripts: Mutex<HashMap<String, String>>,
    pub weapon_scripts: Mutex<HashMap<String, (String, String)>>,
    pub browser_dirs: Mutex<HashMap<String, Vec<BrowserEntry>>>,
    pub browser_files: Mutex<HashMap<String, Vec<u8>>>,
    pub cwd: Mutex<String>,
    pub browser_delay: Mutex<Option<Duration>>,
    pub weapon_list_delay: Mutex<Option<Duration>>,
    pub fail_requests: Mutex<bool>,
    pub auto_reply: Mutex<bool>,
    pub events: Mutex<Option<Weak<dyn SessionEvents>>>,
}

impl std::fmt::Debug for FakeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeSession")
            .field("server", &self.server)
            .finish_non_exhaustive()
    }
}

impl FakeSession {
    pub fn new(server: &str) -> Self {
        Self {
            server: server.to_string(),
            npc_control: true,
            ..Self::default()
        }
    }

    pub fn with_weapons(self, names: &[&str]) -> Self {
        *lock(&self.weapons) = names.iter().map(|n| ExplorerEntry::from(*n)).collect();
        self
    }

    pub fn with_npcs(self, names: &[&str]) -> Self {
        *lock(&self.npcs) = names.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_classes(self, names: &[&str]) -> Self {
        *lock(&self.classes) = names.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_config(self, kind: ConfigKind, text: &str) -> Self {
        lock(&self.configs).insert(kind.as_str().to_string(), text.to_string());
        self
    }

    /// Stores content for a push-style read under `key`, for example
    /// `class:Shop` or `npc.flags:Bob`.
    pub fn with_script(self, key: &str, text: &str) -> Self {
        lock(&self.scripts).insert(key.to_string(), text.to_string());
        self
    }

    pub fn with_weapon_script(self, name: &str, image: &str, script: &str) -> Self {
        lock(&self.weapon_scripts).insert(name.to_string(), (image.to_string(), script.to_string()));
        self
    }

    pub fn with_dir(self, dir: &str, entries: Vec<BrowserEntry>) -> Self {
        lock(&self.browser_dirs).insert(dir.to_string(), entries);
        self
    }

    pub fn with_file(self, path: &str, content: &[u8]) -> Self {
        lock(&self.browser_files).insert(path.to_string(), content.to_vec());
        self
    }

    pub fn replying_to(&self, events: Weak<dyn SessionEvents>) {
        *lock(&self.events) = Some(events);
        *lock(&self.auto_reply) = true;
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        lock(&self.calls).push(call);
    }

    fn sink(&self) -> Option<Arc<dyn SessionEvents>> {
        if !*lock(&self.auto_reply) {
            return None;
        }
        lock(&self.events).as_ref().and_then(Weak::upgrade)
    }

    fn push_request(&self, kind: &str, name: &str) -> Result<()> {
        self.record(format!("{kind}:{name}"));
        if *lock(&self.fail_requests) {
            return Err(Error::session("request rejected"));
        }

        let Some(events) = self.sink() else {
            return Ok(());
        };
        let text = lock(&self.scripts).get(&format!("{kind}:{name}")).cloned();
        match (kind, text) {
            ("npc", Some(text)) => events.on_npc_script(name, &text),
            ("npc.attrs", Some(text)) => events.on_npc_attributes(name, &text),
            ("npc.flags", Some(text)) => events.on_npc_flags(name, &text),
            ("class", Some(text)) => events.on_class_script(name, &text),
            ("weapon", _) => {
                let stored = lock(&self.weapon_scripts).get(name).cloned();
                if let Some((image, script)) = stored {
                    events.on_weapon_script(name, &image, &script);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn browser_path(&self, name: &str) -> String {
        format!("{}{name}", lock(&self.cwd))
    }
}

#[async_trait]
impl RemoteSession for FakeSession {
    fn server_name(&self) -> String {
        self.server.clone()
    }

    fn has_npc_control(&self) -> bool {
        self.npc_control
    }

    async fn disconnect(&self) {
        self.record("disconnect".to_string());
    }

    async fn send_chat(&self, text: &str) -> Result<()> {
        lock(&self.chats).push(text.to_string());
        Ok(())
    }

    async fn set_nickname(&self, nickname: &str) -> Result<()> {
        *lock(&self.nickname) = Some(nickname.to_string());
        Ok(())
    }

    async fn request_config(&self, kind: ConfigKind) -> Result<String> {
        self.record(format!("request_config:{}", kind.as_str()));
        Ok(lock(&self.configs)
            .get(kind.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn set_config(&self, kind: ConfigKind, text: &str) -> Result<()> {
        self.record(format!("set_config:{}", kind.as_str()));
        lock(&self.configs).insert(kind.as_str().to_string(), text.to_string());
        Ok(())
    }

    async fn browser_cd(&self, path: &str) -> Result<DirectoryListing> {
        self.record(format!("browser_cd:{path}"));
        let delay = *lock(&self.browser_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let dir = path.to_string();
        let entries = lock(&self.browser_dirs)
            .get(&dir)
            .cloned()
            .ok_or_else(|| Error::session(format!("no such directory: {path}")))?;
        *lock(&self.cwd) = dir.clone();
        Ok(DirectoryListing {
            directory: dir,
            entries,
        })
    }

    async fn browser_get(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.browser_path(name);
        self.record(format!("browser_get:{path}"));
        lock(&self.browser_files)
            .get(&path)
            .cloned()
            .ok_or_else(|| Error::session(format!("no such file: {path}")))
    }

    async fn browser_put(&self, name: &str, content: &[u8]) -> Result<()> {
        let path = self.browser_path(name);
        self.record(format!("browser_put:{path}"));
        lock(&self.browser_files).insert(path, content.to_vec());
        Ok(())
    }

    fn npc_names(&self) -> Vec<String> {
        lock(&self.npcs).clone()
    }

    fn class_names(&self) -> Vec<String> {
        lock(&self.classes).clone()
    }

    async fn request_weapon_list(&self) -> Result<Vec<ExplorerEntry>> {
        self.weapon_list_fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *lock(&self.weapon_list_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(lock(&self.weapons).clone())
    }

    fn request_npc_script(&self, name: &str) -> Result<()> {
        self.push_request("npc", name)
    }

    fn request_npc_attributes(&self, name: &str) -> Result<()> {
        self.push_request("npc.attrs", name)
    }

    fn request_npc_flags(&self, name: &str) -> Result<()> {
        self.push_request("npc.flags", name)
    }

    fn request_class(&self, name: &str) -> Result<()> {
        self.push_request("class", name)
    }

    fn request_weapon(&self, name: &str) -> Result<()> {
        self.push_request("weapon", name)
    }

    async fn set_npc_script(&self, name: &str, script: &str) -> Result<()> {
        self.record(format!("set_npc_script:{name}"));
        lock(&self.scripts).insert(format!("npc:{name}"), script.to_string());
        Ok(())
    }

    async fn set_npc_flags(&self, name: &str, flags: &str) -> Result<()> {
        self.record(format!("set_npc_flags:{name}"));
        lock(&self.scripts).insert(format!("npc.flags:{name}"), flags.to_string());
        Ok(())
    }

    async fn set_class_script(&self, name: &str, script: &str) -> Result<()> {
        self.record(format!("set_class_script:{name}"));
        lock(&self.scripts).insert(format!("class:{name}"), script.to_string());
        let mut classes = lock(&self.classes);
        if !classes.iter().any(|c| c == name) {
            classes.push(name.to_string());
        }
        Ok(())
    }

    async fn set_weapon_script(&self, name: &str, image: &str, script: &str) -> Result<()> {
        self.record(format!("set_weapon_script:{name}"));
        lock(&self.weapon_scripts).insert(name.to_string(), (image.to_string(), script.to_string()));
        let mut weapons = lock(&self.weapons);
        if !weapons.iter().any(|w| w.resource == name) {
            weapons.push(ExplorerEntry::from(name));
        }
        Ok(())
    }

    async fn delete_class(&self, name: &str) -> Result<()> {
        self.record(format!("delete_class:{name}"));
        lock(&self.classes).retain(|c| c != name);
        Ok(())
    }

    async fn delete_weapon(&self, name: &str) -> Result<()> {
        self.record(format!("delete_weapon:{name}"));
        lock(&self.weapons).retain(|w| w.resource != name);
        Ok(())
    }
}

/// An editor host that records what it was asked to show and answers
/// prompts from scripted values.
#[derive(Debug, Default)]
pub struct FakeEditor {
    pub infos: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
    pub terminal: Mutex<Vec<String>>,
    pub titles: Mutex<Vec<String>>,
    pub documents: Mutex<Vec<(ResourceUri, bool)>>,
    pub opened_local: Mutex<Vec<PathBuf>>,
    pub revealed: Mutex<Vec<DisplayNode>>,
    pub prompts: Mutex<Vec<String>>,
    pub refreshes: AtomicUsize,
    pub clears: AtomicUsize,
    pub inputs: Mutex<VecDeque<Option<String>>>,
    pub confirm_answer: Mutex<bool>,
    pub save_answer: Mutex<Option<PathBuf>>,
    pub folder_answer: Mutex<Option<PathBuf>>,
    pub active: Mutex<Option<ResourceUri>>,
}

impl FakeEditor {
    pub fn answer_input(&self, answer: Option<&str>) {
        lock(&self.inputs).push_back(answer.map(ToString::to_string));
    }

    pub fn terminal_lines(&self) -> Vec<String> {
        lock(&self.terminal).clone()
    }

    pub fn errors(&self) -> Vec<String> {
        lock(&self.errors).clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EditorHost for FakeEditor {
    async fn show_document(&self, resource: &ResourceUri, preview: bool) -> Result<()> {
        lock(&self.documents).push((resource.clone(), preview));
        Ok(())
    }

    async fn open_local(&self, path: &Path) -> Result<()> {
        lock(&self.opened_local).push(path.to_path_buf());
        Ok(())
    }

    async fn show_input_box(&self, prompt: &str) -> Option<String> {
        lock(&self.prompts).push(prompt.to_string());
        lock(&self.inputs).pop_front().flatten()
    }

    async fn confirm(&self, message: &str) -> bool {
        lock(&self.prompts).push(message.to_string());
        *lock(&self.confirm_answer)
    }

    async fn show_save_dialog(&self, default_path: &Path) -> Option<PathBuf> {
        lock(&self.prompts).push(format!("save:{}", default_path.display()));
        lock(&self.save_answer).clone()
    }

    async fn show_folder_dialog(&self, label: &str) -> Option<PathBuf> {
        lock(&self.prompts).push(label.to_string());
        lock(&self.folder_answer).clone()
    }

    fn show_info(&self, message: &str) {
        lock(&self.infos).push(message.to_string());
    }

    fn show_error(&self, message: &str) {
        lock(&self.errors).push(message.to_string());
    }

    fn refresh_tree(&self) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }

    fn set_view_title(&self, title: &str) {
        lock(&self.titles).push(title.to_string());
    }

    fn write_terminal(&self, text: &str) {
        lock(&self.terminal).push(text.to_string());
    }

    fn clear_terminal(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }

    fn active_resource(&self) -> Option<ResourceUri> {
        lock(&self.active).clone()
    }

    async fn reveal(&self, node: &DisplayNode) -> Result<()> {
        lock(&self.revealed).push(node.clone());
        Ok(())
    }
}

/// An explorer wired to a fresh editor, with `session` attached and
/// replying to the explorer's events.
pub fn connected(
    session: FakeSession,
    config: ExplorerConfig,
) -> (Arc<ServerExplorer>, Arc<FakeSession>, Arc<FakeEditor>) {
    let editor = Arc::new(FakeEditor::default());
    let session = Arc::new(session);
    let explorer = Arc::new(ServerExplorer::new(editor.clone(), config).unwrap());

    let events: Arc<dyn SessionEvents> = explorer.clone();
    session.replying_to(Arc::downgrade(&events));
    explorer.attach_session(session.clone());
    (explorer, session, editor)
}

/// An explorer with no session attached.
pub fn disconnected(config: ExplorerConfig) -> (Arc<ServerExplorer>, Arc<FakeEditor>) {
    let editor = Arc::new(FakeEditor::default());
    let explorer = Arc::new(ServerExplorer::new(editor.clone(), config).unwrap());
    (explorer, editor)
}

pub fn uri(path: &str) -> ResourceUri {
    ResourceUri::from_path(path)
}
