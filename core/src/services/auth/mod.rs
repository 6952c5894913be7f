//! Authentication service module
//!
//! This module provides employer signup and login:
//! - Signup with a generated temporary password and welcome mail
//! - Email and password login
//! - Session issuance for an authenticated identity

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, SessionGrant, SignupRequest};
