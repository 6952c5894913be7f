//! Application factory
//!
//! Builds the Actix-web application around an [`AppState`]. The factory is
//! generic over storage and mailer so tests can run it on the in-memory store.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use jb_core::services::WelcomeMailer;
use jb_shared::{error_codes, messages, AppConfig, ErrorResponse};

use crate::dto::ErrorResponseExt;
use crate::middleware::{create_cors, ApiKeyAuth, SecurityMiddleware, SessionAuth};
use crate::routes::employer::{get, login, signup, update};
use crate::routes::health::health_check;
use crate::routes::{AppState, EmployerStore};

/// Create and configure the application with all dependencies
pub fn create_app<R, M>(
    state: web::Data<AppState<R, M>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    let api_key = ApiKeyAuth::new(config.auth.api_key.clone());
    let session = SessionAuth::new(state.authenticator.clone());

    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(|err, _req| {
            tracing::debug!(error = %err, "Rejected malformed JSON body");
            let response = ErrorResponse::new(error_codes::BAD_REQUEST, messages::MISSING_REQUIRED_VALUE)
                .to_response(StatusCode::BAD_REQUEST);
            InternalError::from_response(err, response).into()
        });

    App::new()
        .app_data(state)
        .app_data(json_config)
        // Middleware runs bottom-up: security first, then CORS, then logging
        .wrap(Logger::default())
        .wrap(create_cors(&config.cors))
        .wrap(SecurityMiddleware::for_environment(config.environment))
        .route("/health", web::get().to(health_check::<R, M>))
        .service(
            web::scope("/api/v1/employer")
                .route(
                    "/signup",
                    web::post().to(signup::signup::<R, M>).wrap(api_key.clone()),
                )
                .route(
                    "/login",
                    web::post().to(login::login::<R, M>).wrap(api_key),
                )
                .route(
                    "/update-password",
                    web::post()
                        .to(update::update_password::<R, M>)
                        .wrap(session.clone()),
                )
                .route(
                    "/update-account",
                    web::post()
                        .to(update::update_account::<R, M>)
                        .wrap(session.clone()),
                )
                .route(
                    "/update-company",
                    web::post()
                        .to(update::update_company::<R, M>)
                        .wrap(session.clone()),
                )
                .route(
                    "/update-payment-method",
                    web::post()
                        .to(update::update_payment_method::<R, M>)
                        .wrap(session.clone()),
                )
                .route(
                    "/update-payment-details",
                    web::post()
                        .to(update::update_payment_details::<R, M>)
                        .wrap(session.clone()),
                )
                .route(
                    "/get",
                    web::get().to(get::get_employer::<R, M>).wrap(session.clone()),
                )
                .route(
                    "/get/company",
                    web::get().to(get::get_company::<R, M>).wrap(session),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(error_codes::NOT_FOUND, "The requested resource was not found")
        .to_response(StatusCode::NOT_FOUND)
}
