pub mod cookies;
pub mod middleware;

pub use cookies::{identity_cookies, IdentityCookies, IDENTITY_COOKIE_NAMES};
pub use middleware::identity_middleware;
