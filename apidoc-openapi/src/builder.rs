use std::path::PathBuf;

use apidoc_core::AppConfig;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::DocsError;
use crate::scanner::{self, Annotations};
use crate::schema::SchemaRegistry;

/// OpenAPI version emitted in generated documents.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Default mount point of the documentation UI.
pub const DEFAULT_DOCS_PATH: &str = "/api-docs";

/// Swagger UI release loaded by the documentation page.
pub const SWAGGER_UI_VERSION: &str = "5.17.14";

/// A deployment target listed in the document's `servers` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub url: String,
    pub description: String,
}

impl ServerInfo {
    pub fn new(url: &str, description: &str) -> Self {
        Self {
            url: url.to_string(),
            description: description.to_string(),
        }
    }
}

/// Configuration for the generated OpenAPI document and its UI.
#[derive(Debug, Clone)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    /// Display order only.
    pub servers: Vec<ServerInfo>,
    /// Glob patterns of the files scanned for `@openapi` annotations.
    pub apis: Vec<String>,
    /// Base directory for relative patterns; the working directory when `None`.
    pub source_root: Option<PathBuf>,
    /// Fail when a pattern matches no file instead of warning.
    pub strict_sources: bool,
    pub docs_path: String,
    pub docs_ui: bool,
    /// Base URL of the `swagger-ui-dist` package.
    pub ui_cdn: String,
    pub schemas: SchemaRegistry,
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: None,
            servers: Vec::new(),
            apis: Vec::new(),
            source_root: None,
            strict_sources: false,
            docs_path: DEFAULT_DOCS_PATH.to_string(),
            docs_ui: true,
            ui_cdn: format!("https://unpkg.com/swagger-ui-dist@{SWAGGER_UI_VERSION}"),
            schemas: SchemaRegistry::new(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_server(mut self, url: &str, description: &str) -> Self {
        self.servers.push(ServerInfo::new(url, description));
        self
    }

    /// Add a glob pattern naming files to scan for annotations.
    pub fn with_api(mut self, pattern: &str) -> Self {
        self.apis.push(pattern.to_string());
        self
    }

    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    pub fn with_strict_sources(mut self, strict: bool) -> Self {
        self.strict_sources = strict;
        self
    }

    /// Mount point of the docs routes. A trailing `/` is dropped.
    pub fn with_docs_path(mut self, path: &str) -> Self {
        self.docs_path = normalize_docs_path(path);
        self
    }

    pub fn with_docs_ui(mut self, enabled: bool) -> Self {
        self.docs_ui = enabled;
        self
    }

    pub fn with_ui_cdn(mut self, base_url: &str) -> Self {
        self.ui_cdn = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    /// Override fields from the `openapi.*` keys of an [`AppConfig`].
    ///
    /// Recognised keys: `title`, `version`, `description`, `path`, `ui`,
    /// `strict`, `apis` (list), and `servers.N.url` / `servers.N.description`.
    /// Missing keys leave the current value untouched. When any server is
    /// configured, the configured list replaces the current one.
    pub fn apply_config(mut self, config: &AppConfig) -> Result<Self, DocsError> {
        if let Some(title) = config.get_opt::<String>("openapi.title")? {
            self.title = title;
        }
        if let Some(version) = config.get_opt::<String>("openapi.version")? {
            self.version = version;
        }
        if let Some(description) = config.get_opt::<String>("openapi.description")? {
            self.description = Some(description);
        }
        if let Some(path) = config.get_opt::<String>("openapi.path")? {
            self.docs_path = normalize_docs_path(&path);
        }
        if let Some(ui) = config.get_opt::<bool>("openapi.ui")? {
            self.docs_ui = ui;
        }
        if let Some(strict) = config.get_opt::<bool>("openapi.strict")? {
            self.strict_sources = strict;
        }
        if let Some(apis) = config.get_opt::<Vec<String>>("openapi.apis")? {
            self.apis = apis;
        }

        let mut servers = Vec::new();
        for i in 0.. {
            let Some(url) = config.get_opt::<String>(&format!("openapi.servers.{i}.url"))? else {
                break;
            };
            let description = config
                .get_opt::<String>(&format!("openapi.servers.{i}.description"))?
                .unwrap_or_default();
            servers.push(ServerInfo { url, description });
        }
        if !servers.is_empty() {
            self.servers = servers;
        }

        Ok(self)
    }
}

fn normalize_docs_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Build an OpenAPI 3.0.0 JSON document from config and collected annotations.
pub fn build_spec(config: &OpenApiConfig, annotations: &Annotations) -> Value {
    let mut info: Map<String, Value> = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(ref desc) = config.description {
        info.insert("description".into(), json!(desc));
    }

    // Annotation schemas take precedence over registry entries.
    let mut components = annotations.components.clone();
    if !config.schemas.is_empty() {
        let schemas = components
            .entry("schemas")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(schemas) = schemas {
            for (name, schema) in config.schemas.iter() {
                schemas
                    .entry(name.to_string())
                    .or_insert_with(|| schema.clone());
            }
        }
    }

    let mut spec: Map<String, Value> = Map::new();
    spec.insert("openapi".into(), json!(OPENAPI_VERSION));
    spec.insert("info".into(), Value::Object(info));
    spec.insert("servers".into(), json!(config.servers));
    spec.insert("paths".into(), Value::Object(annotations.paths.clone()));
    if !components.is_empty() {
        spec.insert("components".into(), Value::Object(components));
    }
    if !annotations.tags.is_empty() {
        spec.insert("tags".into(), Value::Array(annotations.tags.clone()));
    }

    Value::Object(spec)
}

/// Scan the configured sources and build the document.
///
/// Any scan failure is returned as is; the output is not validated.
pub fn generate(config: &OpenApiConfig) -> Result<Value, DocsError> {
    let annotations = scanner::scan_sources(
        &config.apis,
        config.source_root.as_deref(),
        config.strict_sources,
    )?;
    let spec = build_spec(config, &annotations);

    tracing::info!(
        title = %config.title,
        version = %config.version,
        paths = annotations.paths.len(),
        "OpenAPI document generated"
    );
    Ok(spec)
}
