//! Relays read-only API calls to the backend.
//!
//! Each call forwards the caller's identity cookies and relays the upstream
//! status and body. Nothing is retried and no timeout is imposed beyond the
//! transport defaults.

use axum::{
    body::Body,
    http::{
        header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, COOKIE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use reqwest::{redirect, Client, Url};

use crate::{
    auth::IdentityCookies,
    error::{AppError, AppResult},
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// How the upstream body is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Buffered and re-emitted as JSON when the upstream declares JSON.
    Json,
    /// Streamed through untouched.
    Binary,
}

impl ResponseMode {
    fn accept(self) -> &'static str {
        match self {
            ResponseMode::Json => JSON_CONTENT_TYPE,
            ResponseMode::Binary => "*/*",
        }
    }
}

#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn target(&self, path: &str) -> AppResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let url = Url::parse(&raw).map_err(|e| AppError::ProxySetup(format!("{e}: {raw}")))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(AppError::ProxySetup(format!(
                "unsupported upstream scheme `{other}`: {raw}"
            ))),
        }
    }

    /// Issues `GET base_url + path` on behalf of the caller.
    pub async fn get(
        &self,
        path: &str,
        mode: ResponseMode,
        identity: &IdentityCookies,
    ) -> AppResult<Response> {
        let url = self.target(path)?;

        let mut request = self.client.get(url.clone()).header(ACCEPT, mode.accept());
        if let Some(cookies) = identity.upstream_cookie_header() {
            request = request.header(COOKIE, cookies);
        }

        tracing::debug!(url = %url, mode = ?mode, "Forwarding to upstream");

        let upstream = request.send().await?;
        let status = upstream.status();

        tracing::debug!(url = %url, status = %status, "Upstream responded");

        match mode {
            ResponseMode::Binary => Ok(relay_binary(upstream)),
            ResponseMode::Json => relay_json(upstream).await,
        }
    }
}

fn relay_binary(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let content_length = upstream.headers().get(CONTENT_LENGTH).cloned();

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    if let Some(value) = content_type {
        headers.insert(CONTENT_TYPE, value);
    }
    if let Some(value) = content_length {
        headers.insert(CONTENT_LENGTH, value);
    }

    response
}

async fn relay_json(upstream: reqwest::Response) -> AppResult<Response> {
    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let bytes = upstream.bytes().await?;
    let text = String::from_utf8_lossy(&bytes);

    let declared_json = content_type
        .as_ref()
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE));

    if declared_json {
        let source = if text.is_empty() { "{}" } else { text.as_ref() };
        match serde_json::from_str::<serde_json::Value>(source) {
            Ok(value) => return Ok((status, Json(value)).into_response()),
            Err(e) => tracing::debug!(error = %e, "Upstream declared JSON but body did not parse"),
        }
    }

    Ok(raw_text(status, content_type, text.into_owned()))
}

fn raw_text(status: StatusCode, content_type: Option<HeaderValue>, body: String) -> Response {
    let content_type =
        content_type.unwrap_or_else(|| HeaderValue::from_static(JSON_CONTENT_TYPE));
    (status, [(CONTENT_TYPE, content_type)], body).into_response()
}
