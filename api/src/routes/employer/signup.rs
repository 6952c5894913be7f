use actix_web::{web, HttpResponse};

use jb_core::services::WelcomeMailer;

use crate::dto::{SessionResponse, SignupRequest};
use crate::handlers::handle_domain_error;
use crate::routes::{AppState, EmployerStore};

/// Handler for POST /api/v1/employer/signup
///
/// Creates the employer, mails a temporary password and returns a session.
///
/// # Request Body
///
/// ```json
/// { "firstname": "Jane", "lastname": "Doe", "email": "jane@example.com" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "token": "ZXlKaGJHY2lPaUpJVXpJMU5pSXNJblI1Y0NJNklrcFhWQ0o5...", "expiresin": 604800, "registrationstep": "change-password" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing fields or invalid email
/// - 401 Unauthorized: Missing or wrong API key
/// - 409 Conflict: Email already registered
/// - 500 Internal Server Error: Mail delivery or storage failure
pub async fn signup<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    match state.auth_service.signup(request.into_inner().into()).await {
        Ok(grant) => HttpResponse::Created().json(SessionResponse::from(grant)),
        Err(error) => handle_domain_error(error),
    }
}
