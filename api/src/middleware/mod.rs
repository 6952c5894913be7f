pub mod api_key;
pub mod auth;
pub mod cors;
pub mod security;

pub use api_key::*;
pub use auth::*;
pub use cors::*;
pub use security::*;
