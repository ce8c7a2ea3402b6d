//! HTTP inbound adapter exposing REST endpoints.
//!
//! JSON API routes are mounted under `/api/v1`; the browser-facing auth
//! redirects sit at the root so provider links stay short.

pub mod auth;
pub mod discovery;
pub mod edu;
pub mod error;
pub mod health;
pub mod onboarding;
pub mod password;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod waitlist;

use actix_web::web;

pub use error::{ApiResult, json_config, query_config};

/// Register the JSON API handlers. Mount inside the `/api/v1` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(discovery::search)
        .service(discovery::search_campuses)
        .service(discovery::list_places)
        .service(onboarding::get_onboarding)
        .service(onboarding::apply_onboarding_action)
        .service(edu::verify_code)
        .service(waitlist::join_waitlist)
        .service(password::reset_password);
}

/// Register the browser redirect targets used by the identity provider.
pub fn configure_auth(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::auth_callback).service(edu::confirm_edu);
}
