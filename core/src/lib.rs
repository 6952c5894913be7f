//! # BiT Jobs Core
//!
//! Core business logic and domain layer for the BiT Jobs employer API.
//! This crate contains the identity and onboarding domain: password hashing,
//! session tokens, request authentication and the registration progress
//! tracker, together with the repository interfaces they depend on.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
