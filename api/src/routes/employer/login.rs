use actix_web::{web, HttpResponse};

use jb_core::services::WelcomeMailer;

use crate::dto::{LoginRequest, SessionResponse};
use crate::handlers::handle_domain_error;
use crate::routes::{AppState, EmployerStore};

/// Handler for POST /api/v1/employer/login
///
/// ## Errors
/// - 400 Bad Request: Email or password missing
/// - 401 Unauthorized: Wrong API key, unknown email or wrong password
pub async fn login<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    match state.auth_service.login(&request.email, &request.password).await {
        Ok(grant) => HttpResponse::Ok().json(SessionResponse::from(grant)),
        Err(error) => handle_domain_error(error),
    }
}
