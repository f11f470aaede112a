use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use campusdesk_core::RoutePath;

use crate::Role;

/// A menu entry or administrative action, defined once by page-owning code.
///
/// Visibility is decided by `roles` alone; it is an independent policy from
/// page access and does not consult the permission table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub title: Cow<'static, str>,
    pub path: RoutePath,
    pub roles: BTreeSet<Role>,
}

impl NavigationItem {
    pub fn new(
        title: impl Into<Cow<'static, str>>,
        path: &str,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self {
            title: title.into(),
            path: RoutePath::parse(path),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn is_visible_to(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// The items `role` may see, in their original order.
pub fn visible_items(items: &[NavigationItem], role: Role) -> Vec<&NavigationItem> {
    items.iter().filter(|item| item.is_visible_to(role)).collect()
}
