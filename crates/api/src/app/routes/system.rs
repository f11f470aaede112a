use axum::{
    Extension, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use campusdesk_auth::Session;

use crate::context::SessionContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize)]
struct SessionView<'a> {
    #[serde(flatten)]
    session: &'a Session,
    has_token: bool,
}

/// GET /session - The session (role, timestamps, token presence) this request was served as
pub async fn session(Extension(ctx): Extension<SessionContext>) -> Response {
    let session = ctx.session();
    Json(SessionView {
        session,
        has_token: session.token().is_some(),
    })
    .into_response()
}
