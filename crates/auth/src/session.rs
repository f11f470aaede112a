//! The single active role of one client.
//!
//! A `Session` is a plain value owned by whoever drives one client: the app
//! shell on a desktop, or a request context on a server. It is never a
//! process-wide singleton.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{IdentityClaims, Role};

/// Identity of a session, used to correlate log lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Holder of the current role.
///
/// Role changes are atomic replacements: the next read after [`Session::set_role`]
/// sees the new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    id: SessionId,
    role: Role,
    #[serde(skip)]
    token: Option<String>,
    started_at: DateTime<Utc>,
    role_changed_at: DateTime<Utc>,
}

impl Session {
    pub fn new(role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            role,
            token: None,
            started_at: now,
            role_changed_at: now,
        }
    }

    /// Start a session from login output, trusting the role claim as-is.
    pub fn from_claims(claims: IdentityClaims) -> Self {
        Self {
            token: Some(claims.token),
            ..Self::new(claims.role)
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Replace the active role, returning the previous one.
    pub fn set_role(&mut self, role: Role) -> Role {
        let previous = core::mem::replace(&mut self.role, role);
        if previous != role {
            self.role_changed_at = Utc::now();
            tracing::info!(session = %self.id, from = %previous, to = %role, "role switched");
        }
        previous
    }

    /// Opaque token from the login step, if the session came from one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn role_changed_at(&self) -> DateTime<Utc> {
        self.role_changed_at
    }
}
