//! Session token module
//!
//! This module handles:
//! - HS256 session token issuance and verification
//! - The transport encoding used on the `Authorization` header

mod codec;
mod config;
pub mod transport;

#[cfg(test)]
mod tests;

pub use codec::SessionTokenCodec;
pub use config::TokenConfig;
