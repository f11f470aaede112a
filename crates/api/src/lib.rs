//! HTTP API: a server-side port of the page access engine.
//!
//! Each request carries its own session context; nothing about the active
//! role is kept in process-wide state.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
