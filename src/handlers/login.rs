use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    auth::identity_cookies,
    config::Config,
    error::{AppError, AppResult},
    extractors::FormOrJson,
};

pub const LOGIN_PATH: &str = "/mobile/login";
pub const HOME_PATH: &str = "/mobile/home";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub empid: String,
    #[serde(default)]
    pub companyid: String,
}

/// `POST /mobile/login`: sets the identity cookies and sends the browser home.
pub async fn login_submit(
    State(config): State<Arc<Config>>,
    FormOrJson(form): FormOrJson<LoginForm>,
) -> AppResult<Response> {
    let empid = form.empid.trim();
    let companyid = form.companyid.trim();

    if empid.is_empty() || companyid.is_empty() {
        return Err(AppError::InvalidLogin);
    }

    let mut response = Redirect::to(HOME_PATH).into_response();
    for cookie in identity_cookies(empid, companyid, &config.cookie) {
        let value = HeaderValue::from_str(&cookie.encoded().to_string())
            .map_err(|e| AppError::Internal(format!("cookie {}: {e}", cookie.name())))?;
        response.headers_mut().append(SET_COOKIE, value);
    }

    tracing::debug!(empid, companyid, "Login accepted");

    Ok(response)
}
