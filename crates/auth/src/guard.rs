//! Route guard state machine.
//!
//! The guard is fed (path, role) snapshots. Any change to either re-evaluates
//! access; entering `Denied` issues exactly one redirect to the fallback path.
//! There is no retry: a fallback the active role cannot view would loop, which
//! is why [`AccessResolver::check_fallback`] must hold for the configured table.

use std::sync::Arc;

use campusdesk_core::{DomainResult, RoutePath};

use crate::{AccessResolver, Role};

/// Host routing hook used by the guard to leave a denied page.
pub trait Navigator {
    /// Route the client to `to`.
    ///
    /// The guard does not move itself: the host must report the new location
    /// back (through [`RouteGuard::observe`] or `AppShell::navigate`). Until it
    /// does, the guard and the shell keep the denied path as their location.
    fn redirect(&mut self, to: &RoutePath);
}

/// Observable guard state for the last evaluated (path, role) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Nothing evaluated yet.
    Idle,
    Permitted { path: RoutePath, role: Role },
    /// Protected content must not render; a redirect has been issued.
    Denied {
        path: RoutePath,
        role: Role,
        redirect_to: RoutePath,
    },
}

impl GuardState {
    fn snapshot(&self) -> Option<(&RoutePath, Role)> {
        match self {
            GuardState::Idle => None,
            GuardState::Permitted { path, role } | GuardState::Denied { path, role, .. } => {
                Some((path, *role))
            }
        }
    }
}

/// Result of feeding one snapshot to the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Same (path, role) as last time; nothing re-evaluated.
    Unchanged,
    Permitted,
    Redirected { to: RoutePath },
}

pub struct RouteGuard {
    resolver: Arc<AccessResolver>,
    fallback: RoutePath,
    state: GuardState,
}

impl RouteGuard {
    /// Build a guard, refusing a fallback that some role cannot view.
    pub fn new(resolver: Arc<AccessResolver>, fallback: RoutePath) -> DomainResult<Self> {
        resolver.check_fallback(&fallback)?;
        Ok(Self {
            resolver,
            fallback,
            state: GuardState::Idle,
        })
    }

    pub fn fallback(&self) -> &RoutePath {
        &self.fallback
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Whether the current page may be rendered.
    pub fn is_permitted(&self) -> bool {
        matches!(self.state, GuardState::Permitted { .. })
    }

    /// Evaluate the current (path, role) pair.
    ///
    /// Callers pass the path and role together so that simultaneous changes
    /// are both reflected in a single evaluation.
    pub fn observe<N: Navigator>(
        &mut self,
        path: &RoutePath,
        role: Role,
        navigator: &mut N,
    ) -> GuardOutcome {
        if self.state.snapshot() == Some((path, role)) {
            return GuardOutcome::Unchanged;
        }

        let decision = self.resolver.decide_path(path, role);
        if decision.granted {
            self.state = GuardState::Permitted {
                path: path.clone(),
                role,
            };
            return GuardOutcome::Permitted;
        }

        tracing::info!(path = %path, role = %role, to = %self.fallback, "access denied; redirecting");
        self.state = GuardState::Denied {
            path: path.clone(),
            role,
            redirect_to: self.fallback.clone(),
        };
        navigator.redirect(&self.fallback);
        GuardOutcome::Redirected {
            to: self.fallback.clone(),
        }
    }
}

impl core::fmt::Debug for RouteGuard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RouteGuard")
            .field("fallback", &self.fallback)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
