//! `campusdesk-auth` — path-based role authorization for the school
//! administration app.
//!
//! This crate is intentionally decoupled from HTTP and storage. It decides
//! whether a role may view a path, filters menus per role, and drives the
//! redirect-on-deny route guard.

pub mod authorize;
pub mod claims;
pub mod guard;
pub mod navigation;
pub mod permissions;
pub mod roles;
pub mod school;
pub mod session;
pub mod shell;

pub use authorize::{AccessDecision, AccessResolver, DecisionBasis, MatchedRule, UnmatchedPolicy};
pub use claims::IdentityClaims;
pub use guard::{GuardOutcome, GuardState, Navigator, RouteGuard};
pub use navigation::{NavigationItem, visible_items};
pub use permissions::{PermissionRule, PermissionTable};
pub use roles::Role;
pub use session::{Session, SessionId};
pub use shell::{AppShell, ShellChange, ShellConfig};
