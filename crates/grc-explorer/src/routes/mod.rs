//! Resource handlers and the route table binding them to paths.
//!
//! Handlers form a closed set, so they are a plain enum dispatched by
//! `match`. Each one implements the subset of operations that makes sense
//! for its resource category; the rest fall back to an empty listing, a
//! default stat, not-found on read and write, or a no-op head.

mod config;
mod file_browser;
mod index;
mod script;

use crate::context::ExplorerContext;
use grc_core::{DisplayNode, Error, FileStat, ResourceUri, Result};
use grc_vfs::{Params, RouteTable};
use tracing::debug;

pub use file_browser::TEXT_EXTENSIONS;
pub(crate) use file_browser::browser_dir;

/// A routed request: the resource, its captured parameters, and the
/// context to serve it from.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    /// Shared explorer state
    pub ctx: &'a ExplorerContext,
    /// Identifier being served, including any action query
    pub resource: &'a ResourceUri,
    /// Parameters captured by the matching route
    pub params: &'a Params,
}

impl Request<'_> {
    fn not_found(&self) -> Error {
        Error::ResourceNotFound {
            resource: self.resource.key(),
        }
    }
}

/// Handler bound to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteHandler {
    /// `/`
    Index,
    /// `/gserver`
    GServer,
    /// `/npcserver`
    NpcServer,
    /// `/gserver/config/...`
    Config,
    /// `/gserver/players/...`
    Players,
    /// `/gserver/filebrowser/...`
    FileBrowser,
    /// `/npcserver/{npcs,scripts,weapons}/...`
    Script,
}

/// Builds the explorer's route table.
///
/// Registration order is significant: the first matching pattern wins.
///
/// # Errors
///
/// Returns `RouteError::InvalidPattern` if a pattern is malformed.
pub fn explorer_routes() -> grc_vfs::Result<RouteTable<RouteHandler>> {
    RouteTable::new()
        .route("/", RouteHandler::Index)?
        .route("/:controller(gserver)", RouteHandler::GServer)?
        .route("/:controller(npcserver)", RouteHandler::NpcServer)?
        .route(
            "/:controller(gserver)/:category(config)/:name*",
            RouteHandler::Config,
        )?
        .route(
            "/:controller(gserver)/:category(players)/:path*",
            RouteHandler::Players,
        )?
        .route(
            "/:controller(gserver)/:category(filebrowser)/:path*",
            RouteHandler::FileBrowser,
        )?
        .route(
            "/:controller(npcserver)/:type(npcs|scripts|weapons)/:name*",
            RouteHandler::Script,
        )
}

impl RouteHandler {
    /// Lists the children of the requested resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the session call behind the listing fails.
    pub async fn list_children(self, req: &Request<'_>) -> Result<Vec<DisplayNode>> {
        match self {
            Self::Index => Ok(index::root_children()),
            Self::GServer => Ok(index::gserver_children()),
            Self::NpcServer => Ok(index::npcserver_children()),
            Self::Config => Ok(config::list_children(req)),
            Self::Players => Ok(Vec::new()),
            Self::FileBrowser => file_browser::list_children(req).await,
            Self::Script => script::list_children(req).await,
        }
    }

    /// Reports file metadata for the requested resource.
    #[must_use]
    pub fn stat(self, req: &Request<'_>) -> FileStat {
        match self {
            Self::Index | Self::GServer | Self::NpcServer | Self::Players => FileStat::directory(),
            Self::Config => config::stat(req),
            Self::FileBrowser => file_browser::stat(req),
            Self::Script => script::stat(req),
        }
    }

    /// Reads the requested resource's content.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResourceNotFound` for categories without content,
    /// or whatever the session reports.
    pub async fn read(self, req: &Request<'_>) -> Result<Vec<u8>> {
        match self {
            Self::Config => config::read(req).await,
            Self::FileBrowser => file_browser::read(req).await,
            Self::Script => script::read(req).await,
            Self::Index | Self::GServer | Self::NpcServer | Self::Players => Err(req.not_found()),
        }
    }

    /// Writes the requested resource's content.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResourceNotFound` for categories without content,
    /// `Error::NoPermissions` for read-only resources, or whatever the
    /// session reports.
    pub async fn write(self, req: &Request<'_>, content: &[u8]) -> Result<()> {
        match self {
            Self::Config => config::write(req, content).await,
            Self::FileBrowser => file_browser::write(req, content).await,
            Self::Script => script::write(req, content).await,
            Self::Index | Self::GServer | Self::NpcServer | Self::Players => Err(req.not_found()),
        }
    }

    /// Deletes the requested resource without prompting.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unsupported` for categories that cannot be deleted.
    pub async fn delete(self, req: &Request<'_>) -> Result<()> {
        match self {
            Self::Script => script::delete(req).await,
            _ => Err(Error::Unsupported {
                operation: "delete".to_string(),
                resource: req.resource.key(),
            }),
        }
    }

    /// Runs the side effect named by the resource's action query.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor or session fails; a dismissed prompt
    /// is not an error.
    pub async fn head(self, req: &Request<'_>) -> Result<()> {
        match self {
            Self::Config => config::head(req).await,
            Self::FileBrowser => file_browser::head(req).await,
            Self::Script => script::head(req).await,
            Self::Index | Self::GServer | Self::NpcServer | Self::Players => {
                debug!("{:?} head request for {}", self, req.resource);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_routes_build() {
        let table = explorer_routes().unwrap();
        assert_eq!(table.len(), 7);
        assert_eq!(*table.match_path("/").unwrap().handler, RouteHandler::Index);
        assert_eq!(
            *table.match_path("/gserver/players/Stefan").unwrap().handler,
            RouteHandler::Players
        );
    }
}
