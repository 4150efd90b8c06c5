use apidoc_core::http::routing::{get, post};
use apidoc_core::http::{Json, Router};
use apidoc_test::{resolve_path, TestApp};
use serde_json::{json, Value};

#[test]
fn test_resolve_simple_field() {
    let v = json!({"name": "Alice"});
    assert_eq!(resolve_path(&v, "name"), json!("Alice"));
}

#[test]
fn test_resolve_array_nested() {
    let v = json!({"servers": [{"url": "http://localhost:3000"}]});
    assert_eq!(resolve_path(&v, "servers[0].url"), json!("http://localhost:3000"));
}

#[test]
fn test_resolve_openapi_path_keys() {
    let v = json!({"paths": {"/vehicles/{id}": {"get": {"summary": "one"}}}});
    assert_eq!(resolve_path(&v, "paths./vehicles/{id}.get.summary"), json!("one"));
}

#[test]
fn test_resolve_len() {
    let v = json!({"items": [1, 2, 3], "meta": {"a": 1}});
    assert_eq!(resolve_path(&v, "items.len()"), json!(3));
    assert_eq!(resolve_path(&v, "meta.len()"), json!(1));
}

#[test]
fn test_resolve_missing_field() {
    let v = json!({"name": "Alice"});
    assert_eq!(resolve_path(&v, "missing"), Value::Null);
}

#[tokio::test]
async fn test_app_round_trip() {
    let router = Router::new()
        .route("/hello", get(|| async { "hello" }))
        .route(
            "/echo",
            post(|Json(body): Json<Value>| async move { Json(body) }),
        );
    let app = TestApp::new(router);

    app.get("/hello")
        .send()
        .await
        .assert_ok()
        .assert_text_contains("hello");

    app.post("/echo")
        .json(&json!({"make": "Volvo"}))
        .send()
        .await
        .assert_ok()
        .assert_header("content-type", "application/json")
        .assert_json_path("make", "Volvo");

    app.get("/missing").send().await.assert_not_found();
}
