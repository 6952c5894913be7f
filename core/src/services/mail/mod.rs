//! Outbound welcome mail port

mod traits;

pub use traits::{WelcomeMailer, WelcomeMessage};
