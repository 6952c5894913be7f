//! Employer route handlers
//!
//! - Signup and login (behind the API key gate)
//! - Onboarding and profile updates (behind the session gate)
//! - Profile reads

pub mod get;
pub mod login;
pub mod signup;
pub mod update;

use actix_web::HttpResponse;

use jb_core::domain::value_objects::Identity;

use crate::handlers::handle_auth_error;
use crate::middleware::AuthContext;

/// Identity of an employer caller, or the 401 response for anyone else
fn employer_identity(auth: &AuthContext) -> Result<Identity, HttpResponse> {
    auth.employer_identity()
        .cloned()
        .map_err(handle_auth_error)
}
