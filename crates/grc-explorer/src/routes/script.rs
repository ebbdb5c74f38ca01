//! `/npcserver/{npcs,scripts,weapons}/...`: NPCs, class scripts, and weapons.
//!
//! Content reads go through the pending-reply table: the session only
//! acknowledges the request, and the script arrives later as an event.
//! Weapon listings come from the shared weapon-list cache.

use super::Request;
use grc_core::script::split_weapon_script;
use grc_core::{
    ATTRS_SUFFIX, Action, DisplayNode, Error, ExplorerEntry, FLAGS_SUFFIX, FileStat,
    RemoteSession, ReplyTarget, ResourceType, Result,
};
use grc_vfs::{build_nodes, sort_case_insensitive, sort_entries_case_insensitive};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Npcs,
    Scripts,
    Weapons,
}

impl Category {
    fn of(req: &Request<'_>) -> Option<Self> {
        match req.params.get_or_empty("type") {
            "npcs" => Some(Self::Npcs),
            "scripts" => Some(Self::Scripts),
            "weapons" => Some(Self::Weapons),
            _ => None,
        }
    }

    const fn node_kind(self) -> ResourceType {
        match self {
            Self::Npcs => ResourceType::Npc,
            Self::Scripts => ResourceType::Script,
            Self::Weapons => ResourceType::Weapon,
        }
    }
}

fn name<'a>(req: &Request<'a>) -> &'a str {
    req.params.get_or_empty("name")
}

/// Weapon-name prefix of the folder `name` names, `""` at the root.
fn subfolder(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!("{name}/")
    }
}

/// Which pushed reply answers a read of `name` in `category`.
fn reply_target(category: Category, name: &str) -> ReplyTarget {
    match category {
        Category::Npcs => {
            if let Some(npc) = name.strip_suffix(ATTRS_SUFFIX) {
                ReplyTarget::NpcAttributes(npc.to_string())
            } else if let Some(npc) = name.strip_suffix(FLAGS_SUFFIX) {
                ReplyTarget::NpcFlags(npc.to_string())
            } else {
                ReplyTarget::NpcScript(name.to_string())
            }
        }
        Category::Scripts => ReplyTarget::Class(name.to_string()),
        Category::Weapons => ReplyTarget::Weapon(name.to_string()),
    }
}

fn send_request(session: &dyn RemoteSession, target: &ReplyTarget) -> Result<()> {
    match target {
        ReplyTarget::NpcScript(name) => session.request_npc_script(name),
        ReplyTarget::NpcAttributes(name) => session.request_npc_attributes(name),
        ReplyTarget::NpcFlags(name) => session.request_npc_flags(name),
        ReplyTarget::Class(name) => session.request_class(name),
        ReplyTarget::Weapon(name) => session.request_weapon(name),
    }
}

pub async fn list_children(req: &Request<'_>) -> Result<Vec<DisplayNode>> {
    let Some(category) = Category::of(req) else {
        return Ok(Vec::new());
    };
    let Some(session) = req.ctx.session() else {
        return Ok(Vec::new());
    };
    let prefix = req.resource.relative_path();

    let entries = match category {
        Category::Npcs | Category::Scripts => {
            let mut names = if category == Category::Npcs {
                session.npc_names()
            } else {
                session.class_names()
            };
            sort_case_insensitive(&mut names);
            names.into_iter().map(ExplorerEntry::from).collect()
        }
        Category::Weapons => {
            let folder = name(req);
            if folder.is_empty() {
                req.ctx.weapons().refresh();
            }

            let mut entries = req
                .ctx
                .weapons()
                .filtered(&subfolder(folder), move || async move {
                    session.request_weapon_list().await
                })
                .await?;
            sort_entries_case_insensitive(&mut entries);
            entries
        }
    };

    Ok(build_nodes(category.node_kind(), prefix, &entries))
}

pub fn stat(req: &Request<'_>) -> FileStat {
    let name = name(req);
    if name.is_empty() || req.resource.path().ends_with('/') {
        FileStat::directory()
    } else if Category::of(req) == Some(Category::Npcs) && name.ends_with(ATTRS_SUFFIX) {
        FileStat::file().readonly()
    } else {
        FileStat::file()
    }
}

pub async fn read(req: &Request<'_>) -> Result<Vec<u8>> {
    let category = Category::of(req).ok_or_else(|| req.not_found())?;
    let name = name(req);
    if name.is_empty() {
        return Err(req.not_found());
    }

    let session = req.ctx.require_session(req.resource)?;
    let target = reply_target(category, name);
    let key = target.resource().key();

    debug!("Requesting {:?}", target);
    req.ctx
        .pending()
        .create_pending(key, || send_request(session.as_ref(), &target))
        .wait()
        .await
}

pub async fn write(req: &Request<'_>, content: &[u8]) -> Result<()> {
    let category = Category::of(req).ok_or_else(|| req.not_found())?;
    let name = name(req);
    if name.is_empty() {
        return Err(req.not_found());
    }

    let session = req.ctx.require_session(req.resource)?;
    let text = String::from_utf8_lossy(content);

    match reply_target(category, name) {
        ReplyTarget::NpcAttributes(_) => Err(Error::NoPermissions {
            resource: req.resource.key(),
        }),
        ReplyTarget::NpcFlags(npc) => session.set_npc_flags(&npc, &text).await,
        ReplyTarget::NpcScript(npc) => session.set_npc_script(&npc, &text).await,
        ReplyTarget::Class(class) => session.set_class_script(&class, &text).await,
        ReplyTarget::Weapon(weapon) => {
            let (image, script) = split_weapon_script(&text);
            session.set_weapon_script(&weapon, &image, &script).await
        }
    }
}

pub async fn delete(req: &Request<'_>) -> Result<()> {
    let category = Category::of(req).ok_or_else(|| req.not_found())?;
    let name = name(req);
    if name.is_empty() {
        return Err(req.not_found());
    }

    let session = req.ctx.require_session(req.resource)?;
    match category {
        Category::Npcs => {
            return Err(Error::Unsupported {
                operation: "Deleting NPCs".to_string(),
                resource: req.resource.key(),
            });
        }
        Category::Scripts => session.delete_class(name).await?,
        Category::Weapons => session.delete_weapon(name).await?,
    }

    req.ctx.weapons().invalidate();
    Ok(())
}

pub async fn head(req: &Request<'_>) -> Result<()> {
    let Some(category) = Category::of(req) else {
        return Ok(());
    };

    match req.resource.action() {
        Some(Action::Open) => {
            req.ctx
                .editor()
                .show_document(&req.resource.without_query(), false)
                .await
        }
        Some(Action::CreateWeapon) => {
            let prefix = if category == Category::Weapons {
                subfolder(name(req))
            } else {
                String::new()
            };
            create(req, "Enter the weapon name", |session, input| async move {
                let weapon = format!("{prefix}{input}");
                session.set_weapon_script(&weapon, "", "").await
            })
            .await
        }
        Some(Action::CreateScript) => {
            create(req, "Enter the class name", |session, input| async move {
                session.set_class_script(&input, "").await
            })
            .await
        }
        Some(Action::Delete) => confirm_delete(req, category).await,
        None => {
            debug!("Ignoring head request for {}", req.resource);
            Ok(())
        }
    }
}

async fn create<F, Fut>(req: &Request<'_>, prompt: &str, create: F) -> Result<()>
where
    F: FnOnce(Arc<dyn RemoteSession>, String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let session = req.ctx.require_session(req.resource)?;
    let editor = req.ctx.editor();

    let Some(input) = editor.show_input_box(prompt).await else {
        return Ok(());
    };
    let input = input.trim();
    if input.is_empty() {
        return Ok(());
    }

    create(session, input.to_string()).await?;
    req.ctx.weapons().invalidate();
    editor.refresh_tree();
    Ok(())
}

async fn confirm_delete(req: &Request<'_>, category: Category) -> Result<()> {
    let editor = req.ctx.editor();
    if category == Category::Npcs {
        editor.show_error("Deleting NPCs is not supported");
        return Ok(());
    }

    let name = name(req);
    if !editor
        .confirm(&format!("Are you sure you want to delete {name}?"))
        .await
    {
        return Ok(());
    }

    delete(req).await?;
    editor.refresh_tree();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_target_suffixes() {
        assert_eq!(
            reply_target(Category::Npcs, "Bob.attrs"),
            ReplyTarget::NpcAttributes("Bob".into())
        );
        assert_eq!(
            reply_target(Category::Npcs, "Bob.flags"),
            ReplyTarget::NpcFlags("Bob".into())
        );
        assert_eq!(
            reply_target(Category::Npcs, "Bob"),
            ReplyTarget::NpcScript("Bob".into())
        );
        // Suffixes only mean something for NPCs
        assert_eq!(
            reply_target(Category::Weapons, "Bomb.flags"),
            ReplyTarget::Weapon("Bomb.flags".into())
        );
    }

    #[test]
    fn test_reply_key_matches_read_key() {
        for (category, path, name) in [
            (Category::Npcs, "/npcserver/npcs/Bob.attrs", "Bob.attrs"),
            (Category::Scripts, "/npcserver/scripts/Shop", "Shop"),
            (Category::Weapons, "/npcserver/weapons/-Sys/Bomb", "-Sys/Bomb"),
        ] {
            let key = reply_target(category, name).resource().key();
            assert_eq!(key, format!("grc://{path}"));
        }
    }

    #[test]
    fn test_subfolder() {
        assert_eq!(subfolder(""), "");
        assert_eq!(subfolder("-System"), "-System/");
    }
}
