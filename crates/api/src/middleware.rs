use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use campusdesk_auth::{IdentityClaims, Role, Session};

use crate::app::{errors, services::AccessServices};
use crate::context::SessionContext;

/// Header carrying the role claim produced by the login step.
pub const ROLE_HEADER: &str = "x-campusdesk-role";

/// Build a fresh per-request [`SessionContext`] from the request headers.
///
/// The role claim is trusted as-is; a missing claim means the configured
/// default role. The bearer token is opaque and only carried along.
pub async fn session_middleware(
    State(services): State<Arc<AccessServices>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let role = extract_role(req.headers())?.unwrap_or(services.default_role);

    let session = match extract_bearer(req.headers()) {
        Some(token) => Session::from_claims(IdentityClaims::new(token, role)),
        None => Session::new(role),
    };

    req.extensions_mut().insert(SessionContext::new(session));

    Ok(next.run(req).await)
}

fn extract_role(headers: &HeaderMap) -> Result<Option<Role>, Response> {
    let Some(header) = headers.get(ROLE_HEADER) else {
        return Ok(None);
    };

    let raw = header.to_str().map_err(|_| {
        errors::json_error(StatusCode::UNAUTHORIZED, "unknown_role", "role claim is not valid text")
    })?;

    raw.parse::<Role>()
        .map(Some)
        .map_err(|e| errors::json_error(StatusCode::UNAUTHORIZED, "unknown_role", e.to_string()))
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();

    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn role_header_is_optional() {
        assert_eq!(extract_role(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn role_header_is_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static("Accountant"));
        assert_eq!(extract_role(&headers).unwrap(), Some(Role::Accountant));
    }

    #[test]
    fn unknown_role_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static("janitor"));
        let response = extract_role(&headers).unwrap_err();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bearer_token_is_extracted_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer  opaque.token "),
        );
        assert_eq!(extract_bearer(&headers), Some("opaque.token"));

        headers.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer(&headers), None);
    }
}
