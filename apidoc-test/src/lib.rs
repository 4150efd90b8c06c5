//! In-process HTTP testing for apidoc applications.

mod app;
pub mod json_path;
mod response;

pub use app::{TestApp, TestRequest};
pub use json_path::{parse_path, resolve_path, Segment};
pub use response::TestResponse;
