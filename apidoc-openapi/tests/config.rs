use apidoc_core::{AppConfig, ConfigValue};
use apidoc_openapi::{DocsError, OpenApiConfig, ServerInfo, DEFAULT_DOCS_PATH};

// ── Builder methods ─────────────────────────────────────────────────────────

#[test]
fn config_new_defaults() {
    let config = OpenApiConfig::new("My API", "1.0.0");
    assert_eq!(config.title, "My API");
    assert_eq!(config.version, "1.0.0");
    assert!(config.description.is_none());
    assert!(config.servers.is_empty());
    assert!(config.apis.is_empty());
    assert_eq!(config.docs_path, DEFAULT_DOCS_PATH);
    assert!(config.docs_ui);
    assert!(!config.strict_sources);
    assert!(config.ui_cdn.contains("swagger-ui-dist@"));
}

#[test]
fn servers_and_apis_keep_order() {
    let config = OpenApiConfig::new("API", "1.0.0")
        .with_server("http://localhost:3000", "Local server")
        .with_server("https://example.com", "Production server")
        .with_api("./src/b.rs")
        .with_api("./src/a.rs");
    assert_eq!(
        config.servers,
        vec![
            ServerInfo::new("http://localhost:3000", "Local server"),
            ServerInfo::new("https://example.com", "Production server"),
        ]
    );
    assert_eq!(config.apis, vec!["./src/b.rs", "./src/a.rs"]);
}

#[test]
fn docs_path_is_normalized() {
    assert_eq!(OpenApiConfig::new("A", "1").with_docs_path("docs/").docs_path, "/docs");
    assert_eq!(OpenApiConfig::new("A", "1").with_docs_path("/api-docs").docs_path, "/api-docs");
}

#[test]
fn ui_cdn_trailing_slash_dropped() {
    let config = OpenApiConfig::new("A", "1").with_ui_cdn("https://cdn.example.com/swagger/");
    assert_eq!(config.ui_cdn, "https://cdn.example.com/swagger");
}

// ── AppConfig overrides ─────────────────────────────────────────────────────

#[test]
fn apply_config_overrides_fields() {
    let yaml = r#"
openapi:
  title: "Fleet API"
  description: "Overridden"
  path: "/docs"
  ui: false
  strict: true
  apis:
    - "./src/routes.rs"
  servers:
    - url: "http://staging:3000"
      description: "Staging"
"#;
    let app_config = AppConfig::from_yaml_str(yaml, "test").unwrap();
    let config = OpenApiConfig::new("Vehicle API", "1.0.0")
        .with_server("http://localhost:3000", "Local server")
        .apply_config(&app_config)
        .unwrap();

    assert_eq!(config.title, "Fleet API");
    assert_eq!(config.version, "1.0.0");
    assert_eq!(config.description.as_deref(), Some("Overridden"));
    assert_eq!(config.docs_path, "/docs");
    assert!(!config.docs_ui);
    assert!(config.strict_sources);
    assert_eq!(config.apis, vec!["./src/routes.rs"]);
    assert_eq!(config.servers, vec![ServerInfo::new("http://staging:3000", "Staging")]);
}

#[test]
fn apply_empty_config_changes_nothing() {
    let config = OpenApiConfig::new("Vehicle API", "1.0.0")
        .with_server("http://localhost:3000", "Local server")
        .with_api("./src/routes.rs")
        .apply_config(&AppConfig::empty())
        .unwrap();
    assert_eq!(config.title, "Vehicle API");
    assert_eq!(config.servers.len(), 1);
    assert_eq!(config.apis, vec!["./src/routes.rs"]);
}

#[test]
fn apply_config_rejects_bad_types() {
    let mut app_config = AppConfig::empty();
    app_config.set("openapi.ui", ConfigValue::String("sometimes".into()));
    let err = OpenApiConfig::new("A", "1").apply_config(&app_config).unwrap_err();
    assert!(matches!(err, DocsError::Config(_)));
}
