//! apidoc: OpenAPI documentation for Axum applications.
//!
//! This facade crate re-exports the sub-crates through a single dependency.
//! Import everything you need with:
//!
//! ```ignore
//! use apidoc::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature   | Default | Crate            |
//! |-----------|---------|------------------|
//! | `openapi` | **yes** | `apidoc-openapi` |

pub extern crate apidoc_core;

// Re-export everything from apidoc-core at the top level for convenience.
pub use apidoc_core::*;

#[cfg(feature = "openapi")]
pub use apidoc_openapi;

/// Unified prelude: `use apidoc::prelude::*`.
pub mod prelude {
    pub use apidoc_core::http::{Json, Router, StatusCode};
    pub use apidoc_core::{AppBuilder, AppConfig, Cors, HttpError, Plugin, Tracing};

    #[cfg(feature = "openapi")]
    pub use apidoc_openapi::{OpenApiConfig, OpenApiPlugin, SchemaProvider, SchemaRegistry};
}
