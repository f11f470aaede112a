//! Server-side route guard.
//!
//! Every request is evaluated independently against its own session role. A
//! denied request is answered with `303 See Other` to the fallback path and
//! never reaches its handler; no error body is sent.

use std::sync::Arc;

use axum::{
    Extension,
    extract::State,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::app::services::AccessServices;
use crate::context::SessionContext;

pub async fn guard_middleware(
    State(services): State<Arc<AccessServices>>,
    Extension(ctx): Extension<SessionContext>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let decision = services.resolver.decide(req.uri().path(), ctx.role());

    if !decision.granted {
        tracing::info!(
            session = %ctx.session().id(),
            path = %decision.path,
            role = %decision.role,
            to = %services.fallback,
            "access denied; redirecting"
        );
        return Redirect::to(&services.fallback.to_string()).into_response();
    }

    next.run(req).await
}
