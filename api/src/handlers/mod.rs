pub mod error;

pub use error::{handle_auth_error, handle_domain_error};
