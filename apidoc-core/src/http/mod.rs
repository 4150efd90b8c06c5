//! The Axum surface the apidoc crates build on, so downstream crates can
//! depend on `apidoc-core` alone.

pub mod body {
    pub use axum::body::{Body, Bytes};
}

pub mod response {
    pub use axum::response::{Html, IntoResponse, Response};
}

pub mod routing {
    pub use axum::routing::{delete, get, post, put, MethodRouter};
}

pub mod extract {
    pub use axum::extract::{Path, State};
}

pub use axum::http::{header, Method, StatusCode};
pub use axum::{serve, Json, Router};
pub use self::body::Body;
pub use self::response::{Html, IntoResponse, Response};
