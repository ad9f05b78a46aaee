//! Shared helpers for gateway integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header::COOKIE, Method, Request, Response},
    Router,
};
use mobile_gateway::{app, config::Config, AppState};
use std::collections::HashMap;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn start_mock_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub async fn dead_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn config_with(upstream: &str, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("MOBILE_UPSTREAM__BASE_URL".into(), upstream.into());
    vars.insert(
        "MOBILE_PAGES__DIR".into(),
        concat!(env!("CARGO_MANIFEST_DIR"), "/pages").into(),
    );
    vars.insert(
        "MOBILE_PAGES__STATIC_DIR".into(),
        concat!(env!("CARGO_MANIFEST_DIR"), "/static").into(),
    );
    for (k, v) in extra {
        vars.insert((*k).into(), (*v).into());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn gateway(upstream: &str) -> Router {
    gateway_with(upstream, &[])
}

pub fn gateway_with(upstream: &str, extra: &[(&str, &str)]) -> Router {
    app(AppState::new(config_with(upstream, extra)).unwrap())
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_with_cookies(app: Router, uri: &str, cookies: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookies)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
