use axum::{
    response::Redirect,
    routing::get_service,
    Router,
};
use std::path::Path;
use tower_http::services::ServeFile;

use crate::{error::AppError, handlers::login::LOGIN_PATH};

/// Static portal pages, `(route, file in the pages directory)`.
pub const PAGES: &[(&str, &str)] = &[
    ("/mobile/home", "home.html"),
    ("/mobile/profile", "profile.html"),
    ("/mobile/calendar", "calendar.html"),
    ("/mobile/checkin", "checkin.html"),
    ("/mobile/workflow", "workflow.html"),
    ("/mobile/leave/transactions", "leave_transactions.html"),
    ("/mobile/leave/details", "leave_details.html"),
    ("/mobile/document/transactions", "document_transactions.html"),
    ("/mobile/document/details", "document_details.html"),
    ("/mobile/excuse/transactions", "excuse_transactions.html"),
    ("/mobile/excuse/details", "excuse_details.html"),
    ("/mobile/reimbursement/transactions", "reimbursement_transactions.html"),
    ("/mobile/reimbursement/details", "reimbursement_details.html"),
    ("/mobile/flight/transactions", "flight_transactions.html"),
    ("/mobile/flight/details", "flight_details.html"),
    ("/mobile/business/transactions", "business_transactions.html"),
    ("/mobile/business/details", "business_details.html"),
    ("/mobile/onbehalf/leave", "onbehalf_leave.html"),
    ("/mobile/onbehalf/excuse", "onbehalf_excuse.html"),
    ("/mobile/onbehalf/document", "onbehalf_document.html"),
    ("/mobile/onbehalf/reimbursement", "onbehalf_reimbursement.html"),
    ("/mobile/onbehalf/flight", "onbehalf_flight.html"),
    ("/mobile/onbehalf/business", "onbehalf_business.html"),
    ("/mobile/approvals/leave/pending", "pending_leave_transactions.html"),
    ("/mobile/approvals/excuse/pending", "pending_excuse_transactions.html"),
    ("/mobile/approvals/document/pending", "pending_document_transactions.html"),
    ("/mobile/approvals/reimbursement/pending", "pending_reimbursement_transactions.html"),
    ("/mobile/approvals/flight/pending", "pending_flight_transactions.html"),
    ("/mobile/approvals/business/pending", "pending_business_transactions.html"),
    ("/mobile/team/hierarchy", "team_hierarchy.html"),
    ("/mobile/team/calendar", "team_calendar.html"),
];

pub const LOGIN_PAGE: &str = "login.html";

/// Serves one page file; the content type is inferred from its extension.
pub fn page(dir: &Path, file: &str) -> ServeFile {
    ServeFile::new(dir.join(file))
}

/// One `GET` route per entry in [`PAGES`].
pub fn routes<S>(dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    PAGES.iter().fold(Router::new(), |router, &(path, file)| {
        router.route(path, get_service(page(dir, file)))
    })
}

pub async fn redirect_to_login() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
