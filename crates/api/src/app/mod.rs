//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared, read-only access policy and menus
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: consistent error responses
//!
//! Only pages (the router fallback) pass through the route guard. The JSON
//! endpoints in `routes::router()` get a per-request session but are never
//! evaluated as pages, so a policy that restricts `/` cannot bounce them to
//! the fallback.

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::{authz, middleware};

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: services::AccessServices) -> Router {
    let services = Arc::new(services);

    // API endpoints: per-request session only.
    let api = routes::router().layer(
        ServiceBuilder::new()
            .layer(Extension(services.clone()))
            .layer(axum::middleware::from_fn_with_state(
                services.clone(),
                middleware::session_middleware,
            )),
    );

    // Pages: per-request session, then the route guard.
    let pages = Router::new().fallback(routes::pages::page).layer(
        ServiceBuilder::new()
            .layer(Extension(services.clone()))
            .layer(axum::middleware::from_fn_with_state(
                services.clone(),
                middleware::session_middleware,
            ))
            .layer(axum::middleware::from_fn_with_state(
                services,
                authz::guard_middleware,
            )),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(api)
        .merge(pages)
}
