//! The explorer facade: filesystem provider and tree view.

use crate::context::ExplorerContext;
use crate::routes::{Request, RouteHandler, explorer_routes};
use grc_core::{
    DisplayNode, EditorHost, Error, ExplorerConfig, FileStat, RemoteSession, ResourceUri, Result,
};
use grc_vfs::{Params, RouteTable};
use std::sync::Arc;
use tracing::debug;

/// Exposes a remote server's resources to an editor as a virtual
/// filesystem and a tree view.
///
/// Every request is routed by path to a [`RouteHandler`]. Content
/// operations (`read`, `write`, `delete`) fail fast with
/// `Error::Unavailable` while no session is attached; listings and stats
/// still answer from what is available.
///
/// # Examples
///
/// ```no_run
/// use grc_core::{EditorHost, ExplorerConfig, RemoteSession, ResourceUri};
/// use grc_explorer::ServerExplorer;
/// use std::sync::Arc;
///
/// # async fn example(
/// #     editor: Arc<dyn EditorHost>,
/// #     session: Arc<dyn RemoteSession>,
/// # ) -> grc_core::Result<()> {
/// let explorer = ServerExplorer::new(editor, ExplorerConfig::load()?)?;
/// explorer.attach_session(session);
///
/// for node in explorer.root_nodes().await? {
///     println!("{}", node.display_label());
/// }
///
/// let flags = explorer
///     .read(&ResourceUri::parse("grc:///gserver/config/serverflags")?)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ServerExplorer {
    ctx: ExplorerContext,
    routes: RouteTable<RouteHandler>,
}

impl ServerExplorer {
    /// Creates an explorer with no session attached.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the configuration fails validation
    /// or the route table cannot be built.
    pub fn new(editor: Arc<dyn EditorHost>, config: ExplorerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ctx: ExplorerContext::new(editor, config),
            routes: explorer_routes()?,
        })
    }

    /// Shared state behind the explorer.
    #[must_use]
    pub const fn context(&self) -> &ExplorerContext {
        &self.ctx
    }

    /// Attaches a remote session.
    pub fn attach_session(&self, session: Arc<dyn RemoteSession>) {
        self.ctx.attach(session);
    }

    /// Detaches the remote session, rejecting any reads still waiting on it.
    pub fn detach_session(&self) -> Option<Arc<dyn RemoteSession>> {
        self.ctx.detach()
    }

    fn route(&self, resource: &ResourceUri) -> Option<(RouteHandler, Params)> {
        let matched = self.routes.match_path(resource.path());
        if matched.is_none() {
            debug!("No route for {}", resource);
        }
        matched.map(|m| (*m.handler, m.params))
    }

    fn request<'a>(&'a self, resource: &'a ResourceUri, params: &'a Params) -> Request<'a> {
        Request {
            ctx: &self.ctx,
            resource,
            params,
        }
    }

    /// Lists the children of `resource`; unknown paths list as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the session call behind the listing fails or
    /// times out.
    pub async fn list_children(&self, resource: &ResourceUri) -> Result<Vec<DisplayNode>> {
        let Some((handler, params)) = self.route(resource) else {
            return Ok(Vec::new());
        };
        handler
            .list_children(&self.request(resource, &params))
            .await
    }

    /// Reports metadata for `resource`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResourceNotFound` if no route matches.
    pub fn stat(&self, resource: &ResourceUri) -> Result<FileStat> {
        let (handler, params) = self.route(resource).ok_or_else(|| not_found(resource))?;
        Ok(handler.stat(&self.request(resource, &params)))
    }

    /// Reads the content of `resource`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unavailable` without a session,
    /// `Error::ResourceNotFound` if nothing serves the path, or the error
    /// the handler reports.
    pub async fn read(&self, resource: &ResourceUri) -> Result<Vec<u8>> {
        self.ctx.require_session(resource)?;
        debug!("read {}", resource);
        let (handler, params) = self.route(resource).ok_or_else(|| not_found(resource))?;
        handler.read(&self.request(resource, &params)).await
    }

    /// Writes `content` to `resource`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unavailable` without a session,
    /// `Error::ResourceNotFound` if nothing serves the path, or the error
    /// the handler reports.
    pub async fn write(&self, resource: &ResourceUri, content: &[u8]) -> Result<()> {
        self.ctx.require_session(resource)?;
        debug!("write {} ({} bytes)", resource, content.len());
        let (handler, params) = self.route(resource).ok_or_else(|| not_found(resource))?;
        handler.write(&self.request(resource, &params), content).await
    }

    /// Deletes `resource` without prompting.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unavailable` without a session,
    /// `Error::ResourceNotFound` if nothing serves the path, or
    /// `Error::Unsupported` for categories that cannot be deleted.
    pub async fn delete(&self, resource: &ResourceUri) -> Result<()> {
        self.ctx.require_session(resource)?;
        debug!("delete {}", resource);
        let (handler, params) = self.route(resource).ok_or_else(|| not_found(resource))?;
        handler.delete(&self.request(resource, &params)).await
    }

    /// Runs the side effect named by `resource`'s action query (open,
    /// delete, create). Unknown paths are ignored.
    ///
    /// # Errors
    ///
    /// Returns the error the handler reports; dismissed prompts are not
    /// errors.
    pub async fn head(&self, resource: &ResourceUri) -> Result<()> {
        let Some((handler, params)) = self.route(resource) else {
            return Ok(());
        };
        handler.head(&self.request(resource, &params)).await
    }

    /// Top-level nodes of the tree view.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the root listing is static.
    pub async fn root_nodes(&self) -> Result<Vec<DisplayNode>> {
        self.list_children(&ResourceUri::root()).await
    }

    /// Children of a tree node.
    ///
    /// # Errors
    ///
    /// As for [`ServerExplorer::list_children`].
    pub async fn children_of(&self, node: &DisplayNode) -> Result<Vec<DisplayNode>> {
        self.list_children(&node.resource).await
    }
}

fn not_found(resource: &ResourceUri) -> Error {
    Error::ResourceNotFound {
        resource: resource.key(),
    }
}
