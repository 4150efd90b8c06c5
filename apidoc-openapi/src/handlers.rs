use std::sync::Arc;

use apidoc_core::error_response;
use apidoc_core::http::extract::Path;
use apidoc_core::http::response::{Html, IntoResponse, Response};
use apidoc_core::http::routing::get;
use apidoc_core::http::{header, Router, StatusCode};
use serde_json::Value;

use crate::builder::OpenApiConfig;

const INIT_JS: &str = include_str!("../assets/swagger-ui-init.js");
const INDEX_CSS: &str = include_str!("../assets/index.css");

/// File name of the UI bootstrap script under the docs path.
pub const INIT_SCRIPT: &str = "swagger-ui-init.js";

struct DocsState {
    spec_json: String,
    page: Option<String>,
}

impl DocsState {
    fn asset(&self, file: &str) -> Response {
        let (content_type, body) = match (file, self.page.is_some()) {
            ("openapi.json", _) => ("application/json", self.spec_json.clone()),
            (INIT_SCRIPT, true) => ("application/javascript", INIT_JS.to_string()),
            ("index.css", true) => ("text/css", INDEX_CSS.to_string()),
            _ => {
                return error_response(StatusCode::NOT_FOUND, format!("No documentation asset '{file}'"))
            }
        };
        ([(header::CONTENT_TYPE, content_type)], body).into_response()
    }
}

/// Build the router serving the documentation under `config.docs_path`.
///
/// - `{docs_path}` and `{docs_path}/`: the Swagger UI page, with the document
///   embedded as JSON (only when `docs_ui` is enabled).
/// - `{docs_path}/{file}`: static assets (`swagger-ui-init.js`, `index.css`)
///   and `openapi.json`; anything else is a 404.
pub fn docs_routes<T: Clone + Send + Sync + 'static>(
    config: &OpenApiConfig,
    spec: &Value,
) -> Router<T> {
    let spec_json = serde_json::to_string(spec).unwrap_or_else(|_| "{}".to_string());
    let base = if config.docs_path == "/" {
        ""
    } else {
        config.docs_path.as_str()
    };
    let page = config
        .docs_ui
        .then(|| render_page(config, base, &spec_json));

    let state = Arc::new(DocsState { spec_json, page });

    let assets_state = state.clone();
    let mut router = Router::<T>::new().route(
        &format!("{base}/{{file}}"),
        get(move |Path(file): Path<String>| {
            let state = assets_state.clone();
            async move { state.asset(&file) }
        }),
    );

    if state.page.is_some() {
        let page_routes = if base.is_empty() {
            vec!["/".to_string()]
        } else {
            vec![base.to_string(), format!("{base}/")]
        };
        for route in page_routes {
            let page_state = state.clone();
            router = router.route(
                &route,
                get(move || {
                    let state = page_state.clone();
                    async move { Html(state.page.clone().unwrap_or_default()).into_response() }
                }),
            );
        }
    }

    router
}

fn render_page(config: &OpenApiConfig, base: &str, spec_json: &str) -> String {
    let title = escape_html(&config.title);
    let cdn = &config.ui_cdn;
    // Neither `</` nor `<!--` may appear inside a script element.
    let embedded = spec_json.replace("</", "<\\/").replace("<!--", "<\\u0021--");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{cdn}/swagger-ui.css">
    <link rel="stylesheet" href="{base}/index.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script id="openapi-spec" type="application/json">{embedded}</script>
    <script src="{cdn}/swagger-ui-bundle.js"></script>
    <script src="{cdn}/swagger-ui-standalone-preset.js"></script>
    <script src="{base}/{INIT_SCRIPT}"></script>
</body>
</html>"#
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
