//! # Accesso
//!
//! Session gated access control: a login form, an opaque session token
//! store, and an access gate that bounces anonymous requests to the login
//! page while preserving the destination they asked for.

pub mod accesso;
pub mod cli;
