//! Client-side composition of session, guard, and menus.
//!
//! An `AppShell` is created when the application mounts and dropped when it
//! unmounts; nothing survives a reload. Every role or path change runs the
//! guard synchronously before returning, so the next read never sees a stale
//! decision.

use std::sync::Arc;

use campusdesk_core::{DomainResult, RoutePath};

use crate::{
    AccessResolver, GuardOutcome, GuardState, Navigator, NavigationItem, Role, RouteGuard,
    Session, visible_items,
};

/// Static inputs for mounting a shell.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub default_role: Role,
    pub fallback: RoutePath,
    pub sidebar: Vec<NavigationItem>,
    pub actions: Vec<NavigationItem>,
}

/// A simultaneous path and/or role change, evaluated as one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellChange {
    pub path: Option<RoutePath>,
    pub role: Option<Role>,
}

#[derive(Debug)]
pub struct AppShell<N: Navigator> {
    session: Session,
    guard: RouteGuard,
    location: RoutePath,
    sidebar: Vec<NavigationItem>,
    actions: Vec<NavigationItem>,
    navigator: N,
}

impl<N: Navigator> AppShell<N> {
    /// Mount at `location` with a fresh session holding the default role.
    pub fn mount(
        resolver: Arc<AccessResolver>,
        config: ShellConfig,
        location: RoutePath,
        navigator: N,
    ) -> DomainResult<Self> {
        let session = Session::new(config.default_role);
        Self::mount_with_session(resolver, config, session, location, navigator)
    }

    /// Mount with an existing session (e.g. one built from login claims).
    pub fn mount_with_session(
        resolver: Arc<AccessResolver>,
        config: ShellConfig,
        session: Session,
        location: RoutePath,
        navigator: N,
    ) -> DomainResult<Self> {
        let guard = RouteGuard::new(resolver, config.fallback)?;
        let mut shell = Self {
            session,
            guard,
            location,
            sidebar: config.sidebar,
            actions: config.actions,
            navigator,
        };
        tracing::debug!(session = %shell.session.id(), role = %shell.session.role(), "shell mounted");
        shell.evaluate();
        Ok(shell)
    }

    pub fn navigate(&mut self, path: RoutePath) -> GuardOutcome {
        self.apply(ShellChange {
            path: Some(path),
            role: None,
        })
    }

    pub fn switch_role(&mut self, role: Role) -> GuardOutcome {
        self.apply(ShellChange {
            path: None,
            role: Some(role),
        })
    }

    pub fn apply(&mut self, change: ShellChange) -> GuardOutcome {
        if let Some(role) = change.role {
            self.session.set_role(role);
        }
        if let Some(path) = change.path {
            self.location = path;
        }
        self.evaluate()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn role(&self) -> Role {
        self.session.role()
    }

    /// The last location reported by the host.
    ///
    /// After a redirect this is still the denied path until the host calls
    /// [`AppShell::navigate`] with the fallback.
    pub fn location(&self) -> &RoutePath {
        &self.location
    }

    pub fn guard_state(&self) -> &GuardState {
        self.guard.state()
    }

    /// Whether the page at the current location may render.
    pub fn can_render(&self) -> bool {
        self.guard.is_permitted()
    }

    pub fn visible_sidebar(&self) -> Vec<&NavigationItem> {
        visible_items(&self.sidebar, self.session.role())
    }

    pub fn visible_actions(&self) -> Vec<&NavigationItem> {
        visible_items(&self.actions, self.session.role())
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    fn evaluate(&mut self) -> GuardOutcome {
        self.guard
            .observe(&self.location, self.session.role(), &mut self.navigator)
    }
}
