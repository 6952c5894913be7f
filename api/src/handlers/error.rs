//! Domain error to HTTP response mapping.
//!
//! Authentication failures all look the same to the client; the reason is
//! only logged. Internal failures are logged with their detail and reported
//! with a generic message.

use actix_web::{http::StatusCode, HttpResponse};

use jb_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use jb_shared::{error_codes, messages, ErrorResponse};

use crate::dto::ErrorResponseExt;

fn respond(status: StatusCode, code: &str, message: impl Into<String>) -> HttpResponse {
    ErrorResponse::new(code, message).to_response(status)
}

fn internal(detail: &dyn std::fmt::Display) -> HttpResponse {
    tracing::error!("Internal error: {}", detail);
    respond(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        messages::FRIENDLY_ERROR,
    )
}

fn unauthorized() -> HttpResponse {
    respond(StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED, messages::UNAUTHORIZED)
}

/// Map an authentication error to its HTTP response
pub fn handle_auth_error(error: AuthError) -> HttpResponse {
    match error {
        AuthError::Unauthenticated => {
            tracing::debug!("Request rejected: unauthenticated");
            unauthorized()
        }
        AuthError::BadRequest { reason } => {
            tracing::debug!(reason = %reason, "Request rejected: undecodable credentials");
            respond(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, messages::BAD_REQUEST)
        }
        AuthError::InvalidCredentials => respond(
            StatusCode::UNAUTHORIZED,
            error_codes::INVALID_CREDENTIALS,
            messages::INVALID_CREDENTIALS,
        ),
        AuthError::InvalidApiKey => respond(
            StatusCode::UNAUTHORIZED,
            error_codes::INVALID_API_KEY,
            messages::INVALID_API_KEY,
        ),
        AuthError::PasswordMismatch => respond(
            StatusCode::BAD_REQUEST,
            error_codes::BAD_REQUEST,
            messages::PASSWORD_MISMATCH,
        ),
        AuthError::EmployerAlreadyExists => respond(
            StatusCode::CONFLICT,
            error_codes::CONFLICT,
            messages::ALREADY_REGISTERED,
        ),
        e @ AuthError::HashingFailed { .. } => internal(&e),
    }
}

fn handle_token_error(error: TokenError) -> HttpResponse {
    match error {
        e @ TokenError::SigningFailed { .. } => internal(&e),
        e => {
            tracing::debug!(reason = %e, "Request rejected: invalid session token");
            unauthorized()
        }
    }
}

fn handle_validation_error(error: ValidationError) -> HttpResponse {
    let response = match &error {
        ValidationError::RequiredFields { fields } => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, messages::MISSING_REQUIRED_VALUE)
                .add_detail("fields", fields)
        }
        other => ErrorResponse::new(error_codes::VALIDATION_ERROR, other.to_string()),
    };
    response.to_response(StatusCode::BAD_REQUEST)
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(e) => handle_auth_error(e),
        DomainError::Token(e) => handle_token_error(e),
        DomainError::ValidationErr(e) => handle_validation_error(e),
        DomainError::Validation { message } => {
            respond(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
        }
        DomainError::NotFound { resource } => respond(
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        ),
        e @ DomainError::Internal { .. } => internal(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_are_401() {
        for error in [
            AuthError::Unauthenticated,
            AuthError::InvalidCredentials,
            AuthError::InvalidApiKey,
        ] {
            assert_eq!(handle_auth_error(error).status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_token_errors_map_by_kind() {
        assert_eq!(
            handle_domain_error(TokenError::Expired.into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            handle_domain_error(TokenError::InvalidSignature.into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            handle_domain_error(
                TokenError::SigningFailed {
                    reason: "no key".into()
                }
                .into()
            )
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors() {
        assert_eq!(
            handle_auth_error(AuthError::BadRequest { reason: "base64".into() }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_auth_error(AuthError::PasswordMismatch).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_auth_error(AuthError::EmployerAlreadyExists).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            handle_domain_error(ValidationError::InvalidEmail.into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_domain_error(DomainError::not_found("Employer")).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_internal_errors_are_500() {
        assert_eq!(
            handle_domain_error(DomainError::internal("db down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            handle_auth_error(AuthError::HashingFailed { reason: "cost".into() }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
