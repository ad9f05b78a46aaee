use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::handlers::login::LOGIN_PATH;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing login fields")]
    InvalidLogin,

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Proxy setup failed: {0}")]
    ProxySetup(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidLogin => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::ProxySetup(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        match self {
            AppError::InvalidLogin => (status, Html(login_error_page())).into_response(),
            AppError::Upstream(e) => (
                status,
                Json(json!({ "error": "Bad Gateway", "detail": e.to_string() })),
            )
                .into_response(),
            AppError::ProxySetup(detail) => (
                status,
                Json(json!({ "error": "Proxy error", "detail": detail })),
            )
                .into_response(),
            AppError::NotFound => (status, "Not found").into_response(),
            AppError::Internal(_) => (status, "Internal error while logging in.").into_response(),
        }
    }
}

fn login_error_page() -> String {
    format!(
        r#"<html>
  <head><title>Login Error</title></head>
  <body style="font-family: Arial, sans-serif; padding: 20px;">
    <h2>Missing fields</h2>
    <p>Please provide both Emp ID and Company ID.</p>
    <p><a href="{LOGIN_PATH}">Back to Login</a></p>
  </body>
</html>
"#
    )
}

pub type AppResult<T> = Result<T, AppError>;
