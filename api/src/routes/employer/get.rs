use actix_web::{web, HttpResponse};

use jb_core::services::WelcomeMailer;
use jb_shared::{error_codes, ErrorResponse};

use super::employer_identity;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;
use crate::routes::{AppState, EmployerStore};

/// Handler for GET /api/v1/employer/get
///
/// The profile includes `registrationstep` so clients can resume onboarding.
pub async fn get_employer<R, M>(state: web::Data<AppState<R, M>>, auth: AuthContext) -> HttpResponse
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    let identity = match employer_identity(&auth) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    match state.employer_service.get_employer(&identity).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/employer/get/company
pub async fn get_company<R, M>(state: web::Data<AppState<R, M>>, auth: AuthContext) -> HttpResponse
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    let identity = match employer_identity(&auth) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    match state.employer_service.get_company(&identity).await {
        Ok(Some(company)) => HttpResponse::Ok().json(company),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            "No company profile has been saved yet.",
        )),
        Err(error) => handle_domain_error(error),
    }
}
