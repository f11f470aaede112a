//! Access policy endpoints for debugging "why was I sent home?".

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use campusdesk_auth::Role;

use crate::app::{errors, services::AccessServices};
use crate::context::SessionContext;

#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub path: String,
    /// Explain for another role instead of the request role.
    pub role: Option<String>,
}

pub fn router() -> Router {
    Router::new()
        .route("/rules", get(list_rules))
        .route("/explain", get(explain))
}

/// GET /access/rules - The active permission table and its policies
pub async fn list_rules(Extension(services): Extension<Arc<AccessServices>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "unmatched_policy": services.resolver.unmatched_policy(),
        "fallback": services.fallback,
        "rules": services.resolver.table(),
    }))
}

/// GET /access/explain?path=...&role=... - Explain an access decision
pub async fn explain(
    Extension(services): Extension<Arc<AccessServices>>,
    Extension(ctx): Extension<SessionContext>,
    Query(query): Query<ExplainQuery>,
) -> axum::response::Response {
    let role = match query.role.as_deref() {
        None => ctx.role(),
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => role,
            Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "unknown_role", e.to_string()),
        },
    };

    let decision = services.resolver.decide(&query.path, role);
    (StatusCode::OK, Json(decision)).into_response()
}
