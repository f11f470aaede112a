use axum::{Router, routing::get};

pub mod access;
pub mod navigation;
pub mod pages;
pub mod system;

/// Router for all guarded endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/session", get(system::session))
        .route("/navigation", get(navigation::sidebar))
        .route("/actions", get(navigation::actions))
        .nest("/access", access::router())
}
