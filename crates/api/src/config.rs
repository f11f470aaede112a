//! Environment-driven configuration.
//!
//! | variable                   | default        |
//! |----------------------------|----------------|
//! | `CAMPUSDESK_BIND`          | `0.0.0.0:8080` |
//! | `CAMPUSDESK_DEFAULT_ROLE`  | `admin`        |
//! | `CAMPUSDESK_FALLBACK_PATH` | `/`            |
//! | `CAMPUSDESK_UNMATCHED`     | `allow`        |
//! | `CAMPUSDESK_POLICY_FILE`   | built-in table |
//!
//! Set-but-invalid values are errors, never silently replaced by defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use campusdesk_auth::{AccessResolver, PermissionTable, Role, UnmatchedPolicy, school};
use campusdesk_core::{DomainError, RoutePath};

pub const BIND_ENV: &str = "CAMPUSDESK_BIND";
pub const DEFAULT_ROLE_ENV: &str = "CAMPUSDESK_DEFAULT_ROLE";
pub const FALLBACK_PATH_ENV: &str = "CAMPUSDESK_FALLBACK_PATH";
pub const UNMATCHED_ENV: &str = "CAMPUSDESK_UNMATCHED";
pub const POLICY_FILE_ENV: &str = "CAMPUSDESK_POLICY_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    Invalid {
        var: &'static str,
        #[source]
        source: DomainError,
    },

    #[error("{var}: invalid socket address `{value}`")]
    InvalidBind { var: &'static str, value: String },

    #[error("failed to read policy file {path}: {source}")]
    PolicyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("policy {0}")]
    Policy(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub default_role: Role,
    pub fallback: RoutePath,
    pub unmatched: UnmatchedPolicy,
    pub policy_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            default_role: Role::Admin,
            fallback: school::fallback_path(),
            unmatched: UnmatchedPolicy::Allow,
            policy_file: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ENV) {
            config.bind = value.trim().parse().map_err(|_| ConfigError::InvalidBind {
                var: BIND_ENV,
                value,
            })?;
        }

        if let Some(value) = lookup(DEFAULT_ROLE_ENV) {
            config.default_role = value.parse().map_err(|source| ConfigError::Invalid {
                var: DEFAULT_ROLE_ENV,
                source,
            })?;
        }

        if let Some(value) = lookup(FALLBACK_PATH_ENV) {
            config.fallback = RoutePath::parse(&value);
        }

        if let Some(value) = lookup(UNMATCHED_ENV) {
            config.unmatched = value.parse().map_err(|source| ConfigError::Invalid {
                var: UNMATCHED_ENV,
                source,
            })?;
        }

        config.policy_file = lookup(POLICY_FILE_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// Load the permission table and build a resolver, verifying that the
    /// fallback path is viewable by every role.
    pub fn load_resolver(&self) -> Result<AccessResolver, ConfigError> {
        let table = match &self.policy_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::PolicyFile {
                    path: path.clone(),
                    source,
                })?;
                PermissionTable::from_json(&raw)?
            }
            None => school::permission_table(),
        };

        let resolver = AccessResolver::new(table).with_unmatched_policy(self.unmatched);
        resolver.check_fallback(&self.fallback)?;

        tracing::info!(
            rules = resolver.table().len(),
            unmatched = ?self.unmatched,
            fallback = %self.fallback,
            "access policy loaded"
        );

        Ok(resolver)
    }
}
