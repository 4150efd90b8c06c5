use std::path::Path;

use apidoc::{AppBuilder, Cors, Tracing};
use vehicle_api::store::VehicleStore;
use vehicle_api::{docs, routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    apidoc::init_tracing();

    let config = vehicle_api::load_config(Path::new("."))?;
    let addr: String = config.get_or("server.addr", "0.0.0.0:3000".to_string());

    let mut app = AppBuilder::with_state(VehicleStore::new())
        .with_config(config)
        .with(Tracing)?
        .with(Cors::permissive())?
        .register_routes(routes::router());
    docs::install(&mut app)?;

    app.serve(&addr).await
}
