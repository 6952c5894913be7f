//! Business services containing domain logic and use cases.

pub mod auth;
pub mod authenticator;
pub mod employer;
pub mod mail;
pub mod password;
pub mod registration;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, SessionGrant, SignupRequest};
pub use authenticator::{Authenticator, BEARER_SCHEME};
pub use employer::EmployerService;
pub use mail::{WelcomeMailer, WelcomeMessage};
pub use password::PasswordService;
pub use registration::RegistrationTracker;
pub use token::{transport, SessionTokenCodec, TokenConfig};
