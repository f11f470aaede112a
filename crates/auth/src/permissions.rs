use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use campusdesk_core::{DomainError, DomainResult, RoutePath};

use crate::Role;

/// A path prefix and the roles allowed to view anything under it.
///
/// An empty role set is legal: it makes the prefix unreachable for everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRule {
    pub prefix: RoutePath,
    pub roles: BTreeSet<Role>,
}

impl PermissionRule {
    pub fn new(prefix: impl Into<RoutePath>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            prefix: prefix.into(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_unreachable(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Static, declarative page access policy.
///
/// Declaration order only matters to break ties between rules with the same
/// prefix; see [`crate::AccessResolver`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable {
    rules: Vec<PermissionRule>,
}

impl PermissionTable {
    pub fn new(rules: Vec<PermissionRule>) -> Self {
        let table = Self { rules };
        table.report_unreachable();
        table
    }

    /// Append a rule (builder style).
    pub fn rule(mut self, prefix: &str, roles: impl IntoIterator<Item = Role>) -> Self {
        let rule = PermissionRule::new(prefix, roles);
        if rule.is_unreachable() {
            tracing::warn!(prefix = %rule.prefix, "permission rule grants no role; path is unreachable");
        }
        self.rules.push(rule);
        self
    }

    /// Decode a table from JSON: `[{"prefix": "/payments", "roles": ["admin"]}]`.
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        let rules: Vec<PermissionRule> =
            serde_json::from_str(raw).map_err(|e| DomainError::invalid_policy(e.to_string()))?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[PermissionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn report_unreachable(&self) {
        for rule in self.rules.iter().filter(|r| r.is_unreachable()) {
            tracing::warn!(prefix = %rule.prefix, "permission rule grants no role; path is unreachable");
        }
    }
}
