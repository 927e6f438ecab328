//! Authentication
//!
//! Handles:
//! - Email + password and Google sign-in
//! - Session issuance, lookup and revocation
//! - Authentication middleware

mod cookies;
mod google;
mod middleware;
mod origin;
mod password;
mod routes;
pub mod service;
pub mod signing;

pub use cookies::CookieSettings;
pub use middleware::{CurrentUser, MaybeUser, require_auth};
pub use origin::is_trusted_origin;
pub use routes::auth_router;
pub use service::{AuthService, RequestContext};
