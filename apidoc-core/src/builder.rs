use std::collections::HashSet;

use crate::config::AppConfig;
use crate::http::Router;
use crate::plugin::Plugin;
use tracing::info;

type LayerFn = Box<dyn FnOnce(Router) -> Router + Send>;

/// Prefix recorded for routers registered through
/// [`register_routes`](AppBuilder::register_routes).
pub const ROOT_PREFIX: &str = "/";

/// One entry of the builder's route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountInfo {
    /// URL prefix the router was mounted at.
    pub prefix: String,
    /// Who registered it (plugin name, or `"routes"` for plain registrations).
    pub source: &'static str,
}

struct Mount<T> {
    info: MountInfo,
    router: Router<T>,
}

/// Builder for assembling an application.
///
/// Collects state, mounted routers, and Tower layers, then produces an
/// `axum::Router` (or starts serving directly) with everything wired together.
///
/// Routers are mounted at a URL prefix and every mount is recorded, even when
/// the same prefix is mounted twice. At [`build`](Self::build) time only the
/// first router for a given prefix is merged; later ones are skipped with a
/// warning, since Axum rejects overlapping routes.
pub struct AppBuilder<T: Clone + Send + Sync + 'static = ()> {
    state: T,
    config: Option<AppConfig>,
    mounts: Vec<Mount<T>>,
    custom_layers: Vec<LayerFn>,
}

impl AppBuilder<()> {
    /// Create a new, empty builder with no application state.
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl Default for AppBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> AppBuilder<T> {
    /// Create a builder carrying the given application state.
    pub fn with_state(state: T) -> Self {
        Self {
            state,
            config: None,
            mounts: Vec::new(),
            custom_layers: Vec::new(),
        }
    }

    // ── Plugins ─────────────────────────────────────────────────────────

    /// Install a [`Plugin`] into this builder.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use apidoc_core::plugins::{Cors, Tracing};
    ///
    /// let app = AppBuilder::new()
    ///     .with(Tracing)?
    ///     .with(Cors::permissive())?
    ///     .with(OpenApiPlugin::new(config))?;
    /// ```
    pub fn with<Pl: Plugin>(mut self, plugin: Pl) -> Result<Self, Pl::Error> {
        self.install(plugin)?;
        Ok(self)
    }

    /// Install a [`Plugin`] through a mutable reference.
    pub fn install<Pl: Plugin>(&mut self, plugin: Pl) -> Result<(), Pl::Error> {
        tracing::debug!(plugin = Pl::name(), "Installing plugin");
        plugin.install(self)
    }

    // ── Configuration ───────────────────────────────────────────────────

    /// Store an [`AppConfig`] in the builder so plugins can read it.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// The configuration stored with [`with_config`](Self::with_config), if any.
    pub fn config(&self) -> Option<&AppConfig> {
        self.config.as_ref()
    }

    // ── Layers ──────────────────────────────────────────────────────────

    /// Apply a custom transformation to the final router.
    ///
    /// Layers are applied during `build()`, in registration order.
    pub fn with_layer_fn<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Router) -> Router + Send + 'static,
    {
        self.add_layer_fn(f);
        self
    }

    /// Same as [`with_layer_fn`](Self::with_layer_fn), through a mutable reference.
    pub fn add_layer_fn<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(Router) -> Router + Send + 'static,
    {
        self.custom_layers.push(Box::new(f));
        self
    }

    // ── Routes ──────────────────────────────────────────────────────────

    /// Register a raw `axum::Router` fragment at the root of the application.
    pub fn register_routes(mut self, router: Router<T>) -> Self {
        self.push_mount(ROOT_PREFIX, "routes", router);
        self
    }

    /// Mount a router whose routes live under `prefix`.
    ///
    /// The router's own paths are absolute; `prefix` names the route-table
    /// entry and is the key used to detect duplicate mounts.
    pub fn mount(&mut self, prefix: &str, router: Router<T>) -> &mut Self {
        self.push_mount(prefix, "mount", router);
        self
    }

    /// Same as [`mount`](Self::mount), recording `source` as the owner.
    pub fn mount_as(&mut self, prefix: &str, source: &'static str, router: Router<T>) -> &mut Self {
        self.push_mount(prefix, source, router);
        self
    }

    fn push_mount(&mut self, prefix: &str, source: &'static str, router: Router<T>) {
        self.mounts.push(Mount {
            info: MountInfo {
                prefix: prefix.to_string(),
                source,
            },
            router,
        });
    }

    /// The route table, in registration order.
    pub fn mounts(&self) -> Vec<MountInfo> {
        self.mounts.iter().map(|m| m.info.clone()).collect()
    }

    // ── Assembly ────────────────────────────────────────────────────────

    /// Assemble the final `axum::Router` from all mounts and layers.
    pub fn build(self) -> Router {
        let mut router = Router::new();
        let mut seen: HashSet<String> = HashSet::new();

        for mount in self.mounts {
            let prefix = mount.info.prefix;
            if prefix != ROOT_PREFIX && !seen.insert(prefix.clone()) {
                tracing::warn!(
                    prefix = %prefix,
                    source = mount.info.source,
                    "Prefix already mounted; keeping the first registration"
                );
                continue;
            }
            router = router.merge(mount.router);
        }

        let mut app = router.with_state(self.state);

        for layer_fn in self.custom_layers {
            app = layer_fn(app);
        }

        app
    }

    /// Build the application and start serving on the given address.
    ///
    /// Returns after a graceful shutdown (Ctrl-C or SIGTERM).
    pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.build();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, "Server listening");
        crate::http::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

/// Wait for a shutdown signal (Ctrl-C or SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
