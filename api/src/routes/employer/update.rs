//! Onboarding setup actions
//!
//! Each handler persists its data first and then reports the employer's
//! registration step after the tracker was consulted. An action taken out of
//! order still succeeds; the step just stays where it was.

use actix_web::{web, HttpResponse};

use jb_core::domain::entities::{CompanyProfile, PaymentDetails, PaymentMethod, RegistrationStep};
use jb_core::errors::DomainError;
use jb_core::services::WelcomeMailer;
use jb_shared::messages;

use super::employer_identity;
use crate::dto::{
    CompanyResponse, PaymentMethodRequest, StepResponse, UpdateAccountRequest,
    UpdatePasswordRequest,
};
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;
use crate::routes::{AppState, EmployerStore};

fn step_response(result: Result<RegistrationStep, DomainError>) -> HttpResponse {
    match result {
        Ok(step) => HttpResponse::Ok().json(StepResponse {
            message: messages::SUCCESS.to_string(),
            registrationstep: step,
        }),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/employer/update-password
pub async fn update_password<R, M>(
    state: web::Data<AppState<R, M>>,
    auth: AuthContext,
    request: web::Json<UpdatePasswordRequest>,
) -> HttpResponse
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    let identity = match employer_identity(&auth) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    step_response(
        state
            .employer_service
            .update_password(&identity, &request.password, &request.newpassword)
            .await,
    )
}

/// Handler for POST /api/v1/employer/update-account
///
/// Blank fields keep their stored value. Responds with the full profile.
pub async fn update_account<R, M>(
    state: web::Data<AppState<R, M>>,
    auth: AuthContext,
    request: web::Json<UpdateAccountRequest>,
) -> HttpResponse
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    let identity = match employer_identity(&auth) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    match state
        .employer_service
        .update_account(&identity, request.into_inner().into())
        .await
    {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/employer/update-company
pub async fn update_company<R, M>(
    state: web::Data<AppState<R, M>>,
    auth: AuthContext,
    request: web::Json<CompanyProfile>,
) -> HttpResponse
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    let identity = match employer_identity(&auth) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    let company = request.into_inner();
    match state
        .employer_service
        .update_company(&identity, company.clone())
        .await
    {
        Ok(step) => HttpResponse::Ok().json(CompanyResponse {
            company,
            registrationstep: step,
        }),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/employer/update-payment-method
///
/// Accepts `credit-card` or `invoice`.
pub async fn update_payment_method<R, M>(
    state: web::Data<AppState<R, M>>,
    auth: AuthContext,
    request: web::Json<PaymentMethodRequest>,
) -> HttpResponse
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    let identity = match employer_identity(&auth) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    let method: PaymentMethod = match request.method.parse() {
        Ok(method) => method,
        Err(e) => return handle_domain_error(DomainError::from(e)),
    };

    step_response(state.employer_service.set_payment_method(&identity, method).await)
}

/// Handler for POST /api/v1/employer/update-payment-details
pub async fn update_payment_details<R, M>(
    state: web::Data<AppState<R, M>>,
    auth: AuthContext,
    request: web::Json<PaymentDetails>,
) -> HttpResponse
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    let identity = match employer_identity(&auth) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    step_response(
        state
            .employer_service
            .set_payment_details(&identity, request.into_inner())
            .await,
    )
}
