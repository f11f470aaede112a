//! `campusdesk-core` — foundation building blocks shared by the access engine
//! and its HTTP port.
//!
//! This crate contains **pure** primitives (no infrastructure concerns).

pub mod error;
pub mod path;

pub use error::{DomainError, DomainResult};
pub use path::RoutePath;
