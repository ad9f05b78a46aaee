use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Login body, decoded as JSON when the request says `application/json`
/// and as `application/x-www-form-urlencoded` (via `serde_qs`) otherwise.
///
/// A body that cannot be read or decoded is a client input error and is
/// rejected with [`AppError::InvalidLogin`], the only form this service accepts.
pub struct FormOrJson<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json")
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
}

#[async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(&req);

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read login body");
            AppError::InvalidLogin
        })?;

        let value = if json {
            serde_json::from_slice(&bytes).map_err(|e| {
                tracing::debug!(error = %e, "Failed to decode JSON login body");
                AppError::InvalidLogin
            })?
        } else {
            serde_qs::from_bytes(&bytes).map_err(|e| {
                tracing::debug!(error = %e, "Failed to decode form body");
                AppError::InvalidLogin
            })?
        };

        Ok(FormOrJson(value))
    }
}
