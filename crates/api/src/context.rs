use campusdesk_auth::{Role, Session};

/// Session context for a single request.
///
/// Built by the session middleware from the request headers and dropped with
/// the request; never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn role(&self) -> Role {
        self.session.role()
    }
}
