//! Main authentication service implementation

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use jb_shared::utils::validation::{validators, ValidationErrors};

use crate::domain::entities::{Employer, RegistrationStep};
use crate::domain::value_objects::{Identity, IssuedSession};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{CredentialRepository, EmployerRepository, RegistrationStepRepository};
use crate::services::mail::{WelcomeMailer, WelcomeMessage};
use crate::services::password::PasswordService;
use crate::services::registration::RegistrationTracker;
use crate::services::token::SessionTokenCodec;

use super::config::AuthServiceConfig;

/// Data required to open an employer account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Session handed out at signup and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    pub identity: Identity,
    /// Transport-encoded bearer token
    pub token: String,
    pub expires_in: i64,
    pub registration_step: RegistrationStep,
}

/// Authentication service for employer signup and login
pub struct AuthService<R, M>
where
    R: EmployerRepository + CredentialRepository + RegistrationStepRepository,
    M: WelcomeMailer,
{
    /// Employer and credential storage
    repository: Arc<R>,
    /// Welcome mail delivery
    mailer: Arc<M>,
    passwords: Arc<PasswordService>,
    codec: Arc<SessionTokenCodec>,
    tracker: RegistrationTracker<R>,
    config: AuthServiceConfig,
}

impl<R, M> AuthService<R, M>
where
    R: EmployerRepository + CredentialRepository + RegistrationStepRepository,
    M: WelcomeMailer,
{
    pub fn new(
        repository: Arc<R>,
        mailer: Arc<M>,
        passwords: Arc<PasswordService>,
        codec: Arc<SessionTokenCodec>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            tracker: RegistrationTracker::new(repository.clone()),
            repository,
            mailer,
            passwords,
            codec,
            config,
        }
    }

    /// Open an employer account
    ///
    /// This method:
    /// 1. Validates names and email
    /// 2. Generates and hashes a temporary password
    /// 3. Stores the employer at the first onboarding step
    /// 4. Mails the temporary password
    /// 5. Issues a session for the new identity
    ///
    /// The employer row is kept if the mail cannot be sent.
    pub async fn signup(&self, request: SignupRequest) -> DomainResult<SessionGrant> {
        let first_name = request.first_name.trim().to_string();
        let last_name = request.last_name.trim().to_string();
        let email = request.email.trim().to_string();

        let mut errors = ValidationErrors::new();
        errors.require("firstname", &first_name);
        errors.require("lastname", &last_name);
        errors.require("email", &email);
        if !errors.is_empty() {
            return Err(ValidationError::RequiredFields {
                fields: errors.fields(),
            }
            .into());
        }
        if !validators::is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let temporary_password = self
            .passwords
            .generate_temporary(self.config.temporary_password_length);
        let digest = self.passwords.hash(&temporary_password)?;

        let employer = self
            .repository
            .create(Employer::new(first_name, last_name, email), digest)
            .await?;
        tracing::info!(identity = %employer.identity, "Employer signed up");

        let message = WelcomeMessage {
            to: employer.email.clone(),
            first_name: employer.first_name.clone(),
            temporary_password,
        };
        match self.mailer.send_welcome(&message).await {
            Ok(message_id) => {
                tracing::debug!(identity = %employer.identity, message_id = %message_id, "Welcome mail sent");
            }
            Err(e) => {
                tracing::error!(identity = %employer.identity, error = %e, "Welcome mail could not be sent");
                return Err(DomainError::internal(format!("welcome mail failed: {}", e)));
            }
        }

        let session = self.issue_session(&employer.identity)?;
        Ok(SessionGrant {
            identity: employer.identity,
            token: session.token,
            expires_in: session.expires_in,
            registration_step: employer.registration_step,
        })
    }

    /// Exchange email and password for a session
    ///
    /// Unknown email and wrong password both fail with
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<SessionGrant> {
        let mut errors = ValidationErrors::new();
        errors.require("email", email);
        errors.require("password", password);
        if !errors.is_empty() {
            return Err(ValidationError::RequiredFields {
                fields: errors.fields(),
            }
            .into());
        }

        let Some((identity, digest)) = self.repository.find_credential_by_email(email.trim()).await? else {
            tracing::debug!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.passwords.verify(&digest, password) {
            tracing::debug!(identity = %identity, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let registration_step = self.tracker.current_step(&identity).await?;
        let session = self.issue_session(&identity)?;
        tracing::info!(identity = %identity, step = %registration_step, "Employer logged in");

        Ok(SessionGrant {
            identity,
            token: session.token,
            expires_in: session.expires_in,
            registration_step,
        })
    }

    /// Issue a transport-encoded session for an already authenticated identity
    pub fn issue_session(&self, identity: &Identity) -> DomainResult<IssuedSession> {
        self.codec.issue_session(identity).map_err(|e| {
            tracing::error!(identity = %identity, error = %e, "Session token could not be signed");
            DomainError::from(e)
        })
    }
}
