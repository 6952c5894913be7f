//! Value objects representing immutable domain concepts.

mod account;
mod identity;
mod password;
mod session;

// Re-export commonly used types
pub use account::{Account, AccountKind};
pub use identity::Identity;
pub use password::PasswordDigest;
pub use session::{CustomClaims, IssuedSession, SessionClaims};
