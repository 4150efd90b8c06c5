//! Plugin system for apidoc.
//!
//! Plugins are composable units of functionality that can be installed into an
//! [`AppBuilder`] using [`AppBuilder::with`] (chaining) or
//! [`AppBuilder::install`] (through a mutable reference).
//!
//! Installation may fail, e.g. when a plugin generates content at startup.
//! The failure is returned to the caller unchanged; the builder performs no
//! recovery.

use crate::builder::AppBuilder;

/// A composable unit of functionality that can be installed into an [`AppBuilder`].
///
/// Plugins can:
/// - Add layers to the router
/// - Mount routes under a prefix
///
/// # Example
///
/// ```ignore
/// use apidoc_core::{AppBuilder, Plugin};
/// use std::convert::Infallible;
///
/// pub struct Ping;
///
/// impl Plugin for Ping {
///     type Error = Infallible;
///
///     fn install<T: Clone + Send + Sync + 'static>(
///         self,
///         app: &mut AppBuilder<T>,
///     ) -> Result<(), Infallible> {
///         app.mount("/ping", Router::new().route("/ping", get(|| async { "pong" })));
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + 'static {
    /// Error returned when installation fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Install this plugin into the given builder.
    fn install<T: Clone + Send + Sync + 'static>(
        self,
        app: &mut AppBuilder<T>,
    ) -> Result<(), Self::Error>;

    /// The name of this plugin (for diagnostics).
    fn name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}
