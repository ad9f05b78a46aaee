use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::IdentityCookies;

/// Parses the identity cookies once per request and exposes them to handlers
/// as `Extension<IdentityCookies>`.
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    let identity = IdentityCookies::from_headers(request.headers());

    if !identity.is_empty() {
        tracing::trace!(empid = ?identity.emp_id(), companyid = ?identity.company_id(), "Identity cookies present");
    }

    request.extensions_mut().insert(identity);
    next.run(request).await
}
