use axum::{Extension, Json, http::Uri, response::IntoResponse};

use campusdesk_core::RoutePath;

use crate::context::SessionContext;

/// Placeholder for pages served by the CRUD layer.
///
/// Reaching this handler means the route guard permitted the request.
pub async fn page(uri: Uri, Extension(ctx): Extension<SessionContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "page": RoutePath::parse(uri.path()),
        "role": ctx.role(),
    }))
}
