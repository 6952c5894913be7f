//! Request authentication gate

mod service;

#[cfg(test)]
mod tests;

pub use service::{Authenticator, BEARER_SCHEME};
