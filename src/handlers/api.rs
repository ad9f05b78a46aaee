use axum::{extract::State, response::Response, Extension};

use crate::{
    auth::IdentityCookies,
    error::AppResult,
    upstream::{ResponseMode, UpstreamClient},
};

pub async fn profile_summary(
    State(upstream): State<UpstreamClient>,
    Extension(identity): Extension<IdentityCookies>,
) -> AppResult<Response> {
    upstream
        .get("/api/profile/getProfileSummary", ResponseMode::Json, &identity)
        .await
}

pub async fn profile_photo(
    State(upstream): State<UpstreamClient>,
    Extension(identity): Extension<IdentityCookies>,
) -> AppResult<Response> {
    upstream
        .get("/api/profile/getPhoto", ResponseMode::Binary, &identity)
        .await
}

pub async fn latest_attendance_time(
    State(upstream): State<UpstreamClient>,
    Extension(identity): Extension<IdentityCookies>,
) -> AppResult<Response> {
    upstream
        .get("/api/attendance/getCheckinCheckoutTime", ResponseMode::Json, &identity)
        .await
}

pub async fn notification_list(
    State(upstream): State<UpstreamClient>,
    Extension(identity): Extension<IdentityCookies>,
) -> AppResult<Response> {
    upstream
        .get("/api/notification/getNotifications", ResponseMode::Json, &identity)
        .await
}
