//! Route handlers and shared application state

pub mod employer;
pub mod health;

use std::sync::Arc;

use jb_core::repositories::{
    AccountRepository, CredentialRepository, EmployerRepository, RegistrationStepRepository,
};
use jb_core::services::{
    AuthService, AuthServiceConfig, Authenticator, EmployerService, PasswordService,
    SessionTokenCodec, TokenConfig, WelcomeMailer,
};
use jb_infra::database::DatabasePool;
use jb_shared::AuthConfig;

/// Everything the employer routes need from storage
pub trait EmployerStore:
    EmployerRepository + CredentialRepository + RegistrationStepRepository + AccountRepository + 'static
{
}

impl<T> EmployerStore for T where
    T: EmployerRepository + CredentialRepository + RegistrationStepRepository + AccountRepository + 'static
{
}

/// Application state shared by all handlers
pub struct AppState<R, M>
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    pub auth_service: Arc<AuthService<R, M>>,
    pub employer_service: Arc<EmployerService<R>>,
    pub authenticator: Arc<Authenticator>,
    /// Present when running against MySQL; used by the health check
    pub database: Option<DatabasePool>,
}

impl<R, M> AppState<R, M>
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    /// Wire the core services over one storage backend and mailer
    pub fn new(repository: Arc<R>, mailer: Arc<M>, auth: &AuthConfig) -> Self {
        let codec = Arc::new(SessionTokenCodec::new(TokenConfig::from(&auth.jwt)));
        let passwords = Arc::new(PasswordService::new(auth.password_hash_cost));

        let auth_service = AuthService::new(
            repository.clone(),
            mailer,
            passwords.clone(),
            codec.clone(),
            AuthServiceConfig::default(),
        );
        let employer_service = EmployerService::new(repository.clone(), passwords);
        let authenticator = Authenticator::new(codec, repository);

        Self {
            auth_service: Arc::new(auth_service),
            employer_service: Arc::new(employer_service),
            authenticator: Arc::new(authenticator),
            database: None,
        }
    }

    pub fn with_database(mut self, database: DatabasePool) -> Self {
        self.database = Some(database);
        self
    }
}
