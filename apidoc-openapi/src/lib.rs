mod builder;
mod error;
mod ext;
mod handlers;
pub mod scanner;
pub mod schema;

pub use builder::{
    build_spec, generate, OpenApiConfig, ServerInfo, DEFAULT_DOCS_PATH, OPENAPI_VERSION,
    SWAGGER_UI_VERSION,
};
pub use error::DocsError;
pub use ext::OpenApiPlugin;
pub use handlers::{docs_routes, INIT_SCRIPT};
pub use scanner::{Annotation, Annotations};
pub use schema::{SchemaProvider, SchemaRegistry};
