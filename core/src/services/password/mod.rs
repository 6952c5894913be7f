//! Password hashing and temporary password generation

mod service;

pub use service::{PasswordService, DEFAULT_TEMPORARY_PASSWORD_LENGTH, SPECIAL_CHARACTERS};
