use crate::Role;

/// Output of the external login step.
///
/// The token is opaque to this crate: it is carried, never decoded, validated
/// or refreshed. The role claim is trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Opaque session token issued by the login service.
    pub token: String,

    /// The single role granted to the signed-in operator.
    pub role: Role,
}

impl IdentityClaims {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }
}
