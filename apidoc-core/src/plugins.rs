//! Plugins shipped with the core: [`Cors`] and [`Tracing`].

use std::convert::Infallible;

use tower_http::cors::CorsLayer;

use crate::builder::AppBuilder;
use crate::layers::{default_cors, default_trace, init_tracing};
use crate::plugin::Plugin;

/// Wraps the application in a `CorsLayer`.
pub struct Cors(CorsLayer);

impl Cors {
    /// Any origin, method and header.
    pub fn permissive() -> Self {
        Cors(default_cors())
    }
}

impl Plugin for Cors {
    type Error = Infallible;

    fn install<T: Clone + Send + Sync + 'static>(
        self,
        app: &mut AppBuilder<T>,
    ) -> Result<(), Infallible> {
        let Cors(layer) = self;
        app.add_layer_fn(move |router| router.layer(layer));
        Ok(())
    }
}

/// Installs the tracing subscriber and logs every request through
/// tower-http's `TraceLayer`.
pub struct Tracing;

impl Plugin for Tracing {
    type Error = Infallible;

    fn install<T: Clone + Send + Sync + 'static>(
        self,
        app: &mut AppBuilder<T>,
    ) -> Result<(), Infallible> {
        init_tracing();
        app.add_layer_fn(|router| router.layer(default_trace()));
        Ok(())
    }
}
