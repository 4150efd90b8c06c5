use apidoc_core::http::{Body, Router};
use apidoc_core::AppBuilder;
use http::header::CONTENT_TYPE;
use http::request::Builder;
use http::{Method, Request};
use http_body_util::BodyExt;
use serde::Serialize;
use tower::util::ServiceExt;

use crate::response::TestResponse;

/// Drives an assembled `Router` in-process, one `oneshot` call per request.
///
/// No socket is bound, so tests can run in parallel.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Build the builder and wrap the resulting router.
    pub fn from_builder<T: Clone + Send + Sync + 'static>(builder: AppBuilder<T>) -> Self {
        Self::new(builder.build())
    }

    pub fn request(&self, method: Method, uri: &str) -> TestRequest<'_> {
        TestRequest {
            app: self,
            builder: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }

    pub fn get(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::GET, uri)
    }

    pub fn post(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::POST, uri)
    }

    pub fn put(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::PUT, uri)
    }

    pub fn delete(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::DELETE, uri)
    }
}

/// A request being prepared against a [`TestApp`].
pub struct TestRequest<'a> {
    app: &'a TestApp,
    builder: Builder,
    body: Body,
}

impl TestRequest<'_> {
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Serialize `payload` as the body and mark it `application/json`.
    pub fn json(mut self, payload: &impl Serialize) -> Self {
        let bytes = serde_json::to_vec(payload).expect("test payload must serialize to JSON");
        self.builder = self.builder.header(CONTENT_TYPE, "application/json");
        self.body = Body::from(bytes);
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub async fn send(self) -> TestResponse {
        let request = self
            .builder
            .body(self.body)
            .expect("test request has an invalid method, uri or header");
        let response = self
            .app
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router service is infallible");

        let (parts, body) = response.into_parts();
        let bytes = body
            .collect()
            .await
            .expect("response body could not be read")
            .to_bytes();
        TestResponse::new(parts.status, parts.headers, bytes)
    }
}
