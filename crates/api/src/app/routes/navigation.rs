//! Menu endpoints: the sidebar and quick actions narrowed to the request role.

use std::sync::Arc;

use axum::{Extension, Json, response::IntoResponse};

use campusdesk_auth::visible_items;

use crate::app::services::AccessServices;
use crate::context::SessionContext;

/// GET /navigation - Sidebar entries visible to the request role
pub async fn sidebar(
    Extension(services): Extension<Arc<AccessServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> impl IntoResponse {
    let items = visible_items(&services.sidebar, ctx.role());
    Json(serde_json::json!({ "role": ctx.role(), "items": items }))
}

/// GET /actions - Administrative actions visible to the request role
pub async fn actions(
    Extension(services): Extension<Arc<AccessServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> impl IntoResponse {
    let items = visible_items(&services.actions, ctx.role());
    Json(serde_json::json!({ "role": ctx.role(), "items": items }))
}
