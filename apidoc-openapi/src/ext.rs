use apidoc_core::{AppBuilder, Plugin};

use crate::builder::{generate, OpenApiConfig};
use crate::error::DocsError;
use crate::handlers::docs_routes;

/// Plugin that generates the OpenAPI document and mounts its documentation UI.
///
/// Generation runs synchronously during installation; any failure is
/// returned from [`AppBuilder::with`] / [`AppBuilder::install`] and nothing
/// is mounted.
///
/// # Example
///
/// ```ignore
/// use apidoc_openapi::{OpenApiConfig, OpenApiPlugin};
///
/// let app = AppBuilder::new().with(OpenApiPlugin::new(
///     OpenApiConfig::new("My API", "1.0.0")
///         .with_server("http://localhost:3000", "Local server")
///         .with_api("./src/routes.rs"),
/// ))?;
/// ```
pub struct OpenApiPlugin {
    config: OpenApiConfig,
}

impl OpenApiPlugin {
    /// Create a new OpenAPI plugin with the given configuration.
    pub fn new(config: OpenApiConfig) -> Self {
        Self { config }
    }
}

impl Plugin for OpenApiPlugin {
    type Error = DocsError;

    fn install<T: Clone + Send + Sync + 'static>(
        self,
        app: &mut AppBuilder<T>,
    ) -> Result<(), DocsError> {
        let spec = generate(&self.config)?;
        let router = docs_routes::<T>(&self.config, &spec);
        app.mount_as(&self.config.docs_path, "openapi", router);
        tracing::info!(path = %self.config.docs_path, ui = self.config.docs_ui, "API documentation mounted");
        Ok(())
    }
}
