use std::sync::Arc;

use campusdesk_auth::{AccessResolver, NavigationItem, Role, school};
use campusdesk_core::RoutePath;

use crate::config::{ApiConfig, ConfigError};

/// Read-only state shared by every request.
///
/// Holds policy only; the active role always comes from the request.
#[derive(Debug, Clone)]
pub struct AccessServices {
    pub resolver: Arc<AccessResolver>,
    pub fallback: RoutePath,
    pub default_role: Role,
    pub sidebar: Vec<NavigationItem>,
    pub actions: Vec<NavigationItem>,
}

impl AccessServices {
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let resolver = config.load_resolver()?;
        Ok(Self {
            resolver: Arc::new(resolver),
            fallback: config.fallback.clone(),
            default_role: config.default_role,
            sidebar: school::sidebar(),
            actions: school::quick_actions(),
        })
    }
}
