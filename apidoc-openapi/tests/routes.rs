use apidoc_core::http::routing::get;
use apidoc_core::http::Router;
use apidoc_core::{AppBuilder, MountInfo};
use apidoc_openapi::{OpenApiConfig, OpenApiPlugin};
use apidoc_test::TestApp;
use serde_json::Value;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn vehicle_config() -> OpenApiConfig {
    OpenApiConfig::new("Vehicle API", "1.0.0")
        .with_description("A simple API for managing vehicles")
        .with_server("http://localhost:3000", "Local server")
        .with_server("https://vehicleservice.azurewebsites.net", "Production server")
}

fn docs_app(config: OpenApiConfig) -> TestApp {
    let builder = AppBuilder::new()
        .register_routes(Router::new().route("/health", get(|| async { "OK" })))
        .with(OpenApiPlugin::new(config))
        .unwrap();
    TestApp::from_builder(builder)
}

// ── UI page ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn docs_page_serves_html() {
    let app = docs_app(vehicle_config());
    let resp = app
        .get("/api-docs")
        .send()
        .await
        .assert_ok()
        .assert_header("content-type", "text/html")
        .assert_text_contains("<title>Vehicle API</title>")
        .assert_text_contains("/api-docs/swagger-ui-init.js")
        .assert_text_contains("swagger-ui-bundle.js");
    assert!(resp.text().contains(r#""title":"Vehicle API""#));
}

#[tokio::test]
async fn docs_page_with_trailing_slash() {
    let app = docs_app(vehicle_config());
    app.get("/api-docs/")
        .send()
        .await
        .assert_ok()
        .assert_text_contains("openapi-spec");
}

#[tokio::test]
async fn title_is_escaped_in_page() {
    let app = docs_app(OpenApiConfig::new("Cars <&> Trucks", "1.0.0"));
    app.get("/api-docs")
        .send()
        .await
        .assert_ok()
        .assert_text_contains("<title>Cars &lt;&amp;&gt; Trucks</title>");
}

#[tokio::test]
async fn embedded_document_cannot_break_out_of_script() {
    let app = docs_app(
        OpenApiConfig::new("A", "1").with_description("<!-- <script> </script> -->"),
    );
    let resp = app.get("/api-docs").send().await.assert_ok();
    let page = resp.text();
    assert!(!page.contains("<!--"));
    assert!(!page.contains("</script> -->"));
    assert!(page.contains(r"<\u0021-- <script> <\/script> -->"));

    app.get("/api-docs/openapi.json")
        .send()
        .await
        .assert_json_path("info.description", "<!-- <script> </script> -->");
}

// ── Assets ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn init_script_and_stylesheet_are_served() {
    let app = docs_app(vehicle_config());
    app.get("/api-docs/swagger-ui-init.js")
        .send()
        .await
        .assert_ok()
        .assert_header("content-type", "application/javascript")
        .assert_text_contains("SwaggerUIBundle");
    app.get("/api-docs/index.css")
        .send()
        .await
        .assert_ok()
        .assert_header("content-type", "text/css");
}

#[tokio::test]
async fn openapi_json_is_served() {
    let app = docs_app(vehicle_config());
    let resp = app
        .get("/api-docs/openapi.json")
        .send()
        .await
        .assert_ok()
        .assert_header("content-type", "application/json")
        .assert_json_path("openapi", "3.0.0")
        .assert_json_path("info.title", "Vehicle API")
        .assert_json_path("servers.len()", 2)
        .assert_json_path("servers[1].description", "Production server");
    let spec: Value = resp.json();
    assert!(spec["paths"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_asset_is_not_found() {
    let app = docs_app(vehicle_config());
    app.get("/api-docs/nope.js").send().await.assert_not_found();
}

#[tokio::test]
async fn ui_disabled_serves_only_json() {
    let app = docs_app(vehicle_config().with_docs_ui(false));
    app.get("/api-docs").send().await.assert_not_found();
    app.get("/api-docs/swagger-ui-init.js")
        .send()
        .await
        .assert_not_found();
    app.get("/api-docs/openapi.json").send().await.assert_ok();
}

// ── Mounting ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn other_routes_are_untouched() {
    let app = docs_app(vehicle_config());
    app.get("/health").send().await.assert_ok().assert_text_contains("OK");
    app.get("/vehicles").send().await.assert_not_found();
    app.get("/api-docs-extra").send().await.assert_not_found();
}

#[test]
fn mount_table_lists_docs_prefix() {
    let mut app = AppBuilder::new();
    app.install(OpenApiPlugin::new(vehicle_config())).unwrap();
    assert_eq!(
        app.mounts(),
        vec![MountInfo {
            prefix: "/api-docs".into(),
            source: "openapi",
        }]
    );
}

#[tokio::test]
async fn installing_twice_records_both_mounts() {
    let mut builder = AppBuilder::new();
    builder.install(OpenApiPlugin::new(vehicle_config())).unwrap();
    builder.install(OpenApiPlugin::new(vehicle_config())).unwrap();

    let mounts = builder.mounts();
    assert_eq!(mounts.len(), 2);
    assert!(mounts.iter().all(|m| m.prefix == "/api-docs"));

    let app = TestApp::from_builder(builder);
    app.get("/api-docs/openapi.json").send().await.assert_ok();
}

#[tokio::test]
async fn custom_docs_path() {
    let app = docs_app(vehicle_config().with_docs_path("/docs/"));
    app.get("/docs").send().await.assert_ok();
    app.get("/docs/openapi.json")
        .send()
        .await
        .assert_json_path("info.version", "1.0.0");
    app.get("/api-docs").send().await.assert_not_found();
}

#[tokio::test]
async fn install_failure_mounts_nothing() {
    let mut builder = AppBuilder::new();
    let result = builder.install(OpenApiPlugin::new(
        vehicle_config()
            .with_api("./does/not/exist.rs")
            .with_strict_sources(true),
    ));
    assert!(result.is_err());
    assert!(builder.mounts().is_empty());

    let app = TestApp::from_builder(builder);
    app.get("/api-docs").send().await.assert_not_found();
}
