pub mod docs;
pub mod model;
pub mod routes;
pub mod store;

use std::path::Path;

use apidoc::{AppBuilder, AppConfig, ConfigError};
use apidoc_openapi::DocsError;

use store::VehicleStore;

pub const PROFILE: &str = "dev";

/// Configuration layers read from `dir`. Missing files are skipped; a
/// malformed one is an error.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    AppConfig::load_from_dir(dir, PROFILE)
}

/// Assemble the vehicle service: routes plus documentation.
pub fn app(store: VehicleStore) -> Result<AppBuilder<VehicleStore>, DocsError> {
    let mut app = AppBuilder::with_state(store).register_routes(routes::router());
    docs::install(&mut app)?;
    Ok(app)
}
