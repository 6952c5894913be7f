pub mod employer;
pub mod error;

pub use employer::*;
pub use error::{ErrorResponse, ErrorResponseExt};
