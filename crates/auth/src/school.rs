//! Built-in school administration policy: page access, sidebar, and quick
//! actions.

use campusdesk_core::RoutePath;

use crate::{NavigationItem, PermissionTable, Role, ShellConfig};

use Role::{Accountant, Admin, Agent, Teacher};

/// Where denied navigation is sent. Every role may view it.
pub const FALLBACK_PATH: &str = "/";

pub fn fallback_path() -> RoutePath {
    RoutePath::parse(FALLBACK_PATH)
}

pub fn permission_table() -> PermissionTable {
    PermissionTable::default()
        .rule("/", Role::ALL)
        .rule("/students", [Admin, Teacher, Agent])
        .rule("/students/new", [Admin, Agent])
        .rule("/parents", [Admin, Agent])
        .rule("/classes", [Admin, Teacher, Agent])
        .rule("/classes/new", [Admin])
        .rule("/attendance", [Admin, Teacher])
        .rule("/schedule", [Admin, Teacher, Agent])
        .rule("/payments", [Admin, Accountant, Agent])
        .rule("/payments/new", [Admin, Accountant])
        .rule("/settings", [Admin])
}

pub fn sidebar() -> Vec<NavigationItem> {
    vec![
        NavigationItem::new("Dashboard", "/", Role::ALL),
        NavigationItem::new("Students", "/students", [Admin, Teacher, Agent]),
        NavigationItem::new("Parents", "/parents", [Admin, Agent]),
        NavigationItem::new("Classes", "/classes", [Admin, Teacher, Agent]),
        NavigationItem::new("Attendance", "/attendance", [Admin, Teacher]),
        NavigationItem::new("Schedule", "/schedule", [Admin, Teacher, Agent]),
        NavigationItem::new("Payments", "/payments", [Admin, Accountant, Agent]),
        NavigationItem::new("Settings", "/settings", [Admin]),
    ]
}

/// Administrative actions shown on the dashboard.
pub fn quick_actions() -> Vec<NavigationItem> {
    vec![
        NavigationItem::new("Add student", "/students/new", [Admin, Agent]),
        NavigationItem::new("Create class", "/classes/new", [Admin]),
        NavigationItem::new("Take attendance", "/attendance/new", [Admin, Teacher]),
        NavigationItem::new("Record payment", "/payments/new", [Admin, Accountant]),
    ]
}

pub fn shell_config() -> ShellConfig {
    ShellConfig {
        default_role: Admin,
        fallback: fallback_path(),
        sidebar: sidebar(),
        actions: quick_actions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccessResolver, visible_items};

    #[test]
    fn fallback_is_reachable_for_every_role() {
        let resolver = AccessResolver::new(permission_table());
        for role in Role::ALL {
            assert!(resolver.has_access(FALLBACK_PATH, role), "{role} denied on fallback");
        }
        assert!(resolver.check_fallback(&fallback_path()).is_ok());
    }

    #[test]
    fn visible_menu_entries_are_viewable() {
        let resolver = AccessResolver::new(permission_table());
        let items: Vec<NavigationItem> = sidebar().into_iter().chain(quick_actions()).collect();
        for role in Role::ALL {
            for item in visible_items(&items, role) {
                assert!(
                    resolver.has_access(&item.path.to_string(), role),
                    "{role} sees `{}` but cannot open {}",
                    item.title,
                    item.path
                );
            }
        }
    }

    #[test]
    fn payments_scenario_on_real_table() {
        let resolver = AccessResolver::new(permission_table());
        assert!(!resolver.has_access("/payments/new", Agent));
        assert!(resolver.has_access("/payments/new", Accountant));
        assert!(!resolver.has_access("/classes/new", Agent));
        assert!(resolver.has_access("/classes", Agent));
    }

    #[test]
    fn accountant_menu() {
        let items = sidebar();
        let titles: Vec<&str> = visible_items(&items, Accountant)
            .into_iter()
            .map(|i| i.title.as_ref())
            .collect();
        assert_eq!(titles, vec!["Dashboard", "Payments"]);
    }
}
