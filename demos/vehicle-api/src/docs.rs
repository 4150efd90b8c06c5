//! API documentation for the vehicle service.

use apidoc::{AppBuilder, AppConfig};
use apidoc_openapi::{DocsError, OpenApiConfig, OpenApiPlugin, SchemaRegistry};

use crate::model::ErrorBody;

pub const TITLE: &str = "Vehicle API";
pub const VERSION: &str = "1.0.0";
pub const DESCRIPTION: &str = "A simple API for managing vehicles";

/// `(url, description)` pairs, in display order.
pub const SERVERS: [(&str, &str); 2] = [
    ("http://localhost:3000", "Local server"),
    ("https://vehicleservice.azurewebsites.net", "Production server"),
];

/// Files scanned for `@openapi` annotations, relative to the crate root.
pub const APIS: [&str; 2] = ["./src/routes.rs", "./src/model.rs"];

/// The documentation configuration for this service.
pub fn docs_config() -> OpenApiConfig {
    let mut schemas = SchemaRegistry::new();
    schemas.register_type::<ErrorBody>();

    let config = OpenApiConfig::new(TITLE, VERSION)
        .with_description(DESCRIPTION)
        .with_source_root(env!("CARGO_MANIFEST_DIR"))
        .with_schemas(schemas);
    let config = SERVERS
        .iter()
        .fold(config, |config, (url, description)| config.with_server(url, description));
    APIS.iter().fold(config, |config, api| config.with_api(api))
}

/// Generate the document and mount the Swagger UI at `/api-docs`.
///
/// Settings under `openapi.*` in the builder's configuration, if any,
/// override the defaults.
pub fn install<S: Clone + Send + Sync + 'static>(
    app: &mut AppBuilder<S>,
) -> Result<(), DocsError> {
    let config = match app.config() {
        Some(app_config) => docs_config().apply_config(app_config)?,
        None => docs_config(),
    };
    app.install(OpenApiPlugin::new(config))
}

/// Same as [`install`], with an explicit configuration overlay.
pub fn install_with<S: Clone + Send + Sync + 'static>(
    app: &mut AppBuilder<S>,
    overrides: &AppConfig,
) -> Result<(), DocsError> {
    let config = docs_config().apply_config(overrides)?;
    app.install(OpenApiPlugin::new(config))
}
