//! Gateway for the mobile HR portal.
//!
//! Serves the portal's static pages under `/mobile`, turns the login form into
//! identity cookies, and relays a fixed set of read-only API calls to the
//! backend with those cookies attached.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod tenant;
pub mod upstream;

use axum::{
    middleware,
    routing::{get, get_service},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth::identity_middleware;
use crate::config::Config;
use crate::handlers::{api, login, pages};
use crate::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(config.upstream.base_url.clone())?;
        Ok(Self {
            config: Arc::new(config),
            upstream,
        })
    }
}

impl axum::extract::FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for UpstreamClient {
    fn from_ref(state: &AppState) -> Self {
        state.upstream.clone()
    }
}

pub fn app(state: AppState) -> Router {
    let pages_dir = state.config.pages.dir.clone();
    let static_dir = state.config.pages.static_dir.clone();

    Router::new()
        .route("/", get(pages::redirect_to_login))
        .route("/mobile", get(pages::redirect_to_login))
        .route("/mobile/", get(pages::redirect_to_login))
        .route(
            login::LOGIN_PATH,
            get_service(pages::page(&pages_dir, pages::LOGIN_PAGE)).post(login::login_submit),
        )
        .route("/mobile/api/profile/summary", get(api::profile_summary))
        .route("/mobile/api/profile/photo", get(api::profile_photo))
        .route("/mobile/api/attendance/latest-time", get(api::latest_attendance_time))
        .route("/mobile/api/notification/list", get(api::notification_list))
        .merge(pages::routes(&pages_dir))
        .nest_service("/mobile/static", ServeDir::new(static_dir))
        .fallback(pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(identity_middleware)),
        )
        .with_state(state)
}
