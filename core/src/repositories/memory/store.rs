use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{
    CompanyProfile, Employer, PaymentDetails, PaymentMethod, RegistrationStep,
};
use crate::domain::value_objects::{Account, Identity, PasswordDigest};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{
    AccountRepository, CredentialRepository, EmployerRepository, RegistrationStepRepository,
};

struct EmployerRecord {
    employer: Employer,
    digest: PasswordDigest,
    company: Option<CompanyProfile>,
    payment_method: Option<PaymentMethod>,
    payment_details: Option<PaymentDetails>,
}

struct ApplicantRecord {
    digest: PasswordDigest,
}

#[derive(Default)]
struct StoreState {
    employers: HashMap<Identity, EmployerRecord>,
    applicants: HashMap<Identity, ApplicantRecord>,
}

impl StoreState {
    fn employer_mut(&mut self, identity: &Identity) -> Result<&mut EmployerRecord, DomainError> {
        self.employers
            .get_mut(identity)
            .ok_or_else(|| DomainError::not_found("Employer"))
    }

    fn email_taken(&self, email: &str, except: Option<&Identity>) -> bool {
        self.employers.iter().any(|(identity, record)| {
            Some(identity) != except && record.employer.email.eq_ignore_ascii_case(email)
        })
    }
}

/// Shared in-memory store; clones share the same data
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
    account_lookups: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find_account` calls served so far
    pub fn account_lookups(&self) -> usize {
        self.account_lookups.load(Ordering::SeqCst)
    }

    /// Register an applicant account; applicants have no registration step
    pub async fn insert_applicant(&self, identity: Identity, digest: PasswordDigest) {
        let mut state = self.state.write().await;
        state.applicants.insert(identity, ApplicantRecord { digest });
    }

    /// Overwrite an employer's step unconditionally, for seeding fixtures
    pub async fn seed_step(&self, identity: &Identity, step: RegistrationStep) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.employer_mut(identity)?.employer.registration_step = step;
        Ok(())
    }

    /// Stored payment method, for assertions
    pub async fn payment_method(&self, identity: &Identity) -> Option<PaymentMethod> {
        let state = self.state.read().await;
        state.employers.get(identity).and_then(|r| r.payment_method)
    }

    /// Stored payment details, for assertions
    pub async fn payment_details(&self, identity: &Identity) -> Option<PaymentDetails> {
        let state = self.state.read().await;
        state.employers.get(identity).and_then(|r| r.payment_details.clone())
    }

    /// Remove an employer and everything attached to it
    pub async fn remove_employer(&self, identity: &Identity) -> bool {
        self.state.write().await.employers.remove(identity).is_some()
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_account(&self, identity: &Identity) -> Result<Option<Account>, DomainError> {
        self.account_lookups.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().await;

        if state.employers.contains_key(identity) {
            return Ok(Some(Account::employer(identity.clone())));
        }
        if state.applicants.contains_key(identity) {
            return Ok(Some(Account::applicant(identity.clone())));
        }
        Ok(None)
    }
}

#[async_trait]
impl CredentialRepository for InMemoryStore {
    async fn find_credential(&self, identity: &Identity) -> Result<Option<PasswordDigest>, DomainError> {
        let state = self.state.read().await;
        let digest = state
            .employers
            .get(identity)
            .map(|r| r.digest.clone())
            .or_else(|| state.applicants.get(identity).map(|r| r.digest.clone()));
        Ok(digest)
    }

    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(Identity, PasswordDigest)>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .employers
            .iter()
            .find(|(_, r)| r.employer.email.eq_ignore_ascii_case(email.trim()))
            .map(|(identity, r)| (identity.clone(), r.digest.clone())))
    }

    async fn store_credential(&self, identity: &Identity, digest: PasswordDigest) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if let Some(applicant) = state.applicants.get_mut(identity) {
            applicant.digest = digest;
            return Ok(());
        }
        let record = state.employer_mut(identity)?;
        record.digest = digest;
        record.employer.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl RegistrationStepRepository for InMemoryStore {
    async fn find_step(&self, identity: &Identity) -> Result<Option<RegistrationStep>, DomainError> {
        let state = self.state.read().await;
        Ok(state.employers.get(identity).map(|r| r.employer.registration_step))
    }

    async fn advance_step(
        &self,
        identity: &Identity,
        expected: RegistrationStep,
        next: RegistrationStep,
    ) -> Result<bool, DomainError> {
        // Check and write under one write guard.
        let mut state = self.state.write().await;
        match state.employers.get_mut(identity) {
            Some(record) if record.employer.registration_step == expected => {
                record.employer.registration_step = next;
                record.employer.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl EmployerRepository for InMemoryStore {
    async fn create(&self, employer: Employer, digest: PasswordDigest) -> Result<Employer, DomainError> {
        let mut state = self.state.write().await;

        if state.email_taken(&employer.email, None) || state.employers.contains_key(&employer.identity) {
            return Err(AuthError::EmployerAlreadyExists.into());
        }

        state.employers.insert(
            employer.identity.clone(),
            EmployerRecord {
                employer: employer.clone(),
                digest,
                company: None,
                payment_method: None,
                payment_details: None,
            },
        );
        Ok(employer)
    }

    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<Employer>, DomainError> {
        let state = self.state.read().await;
        Ok(state.employers.get(identity).map(|r| r.employer.clone()))
    }

    async fn update_account(&self, employer: &Employer) -> Result<(), DomainError> {
        let mut state = self.state.write().await;

        if state.email_taken(&employer.email, Some(&employer.identity)) {
            return Err(AuthError::EmployerAlreadyExists.into());
        }

        let record = state.employer_mut(&employer.identity)?;
        // The step is owned by the tracker and never written from here.
        let step = record.employer.registration_step;
        record.employer = Employer {
            registration_step: step,
            ..employer.clone()
        };
        Ok(())
    }

    async fn update_company(&self, identity: &Identity, company: &CompanyProfile) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let record = state.employer_mut(identity)?;
        record.company = Some(company.clone());
        record.employer.updated_at = Utc::now();
        Ok(())
    }

    async fn find_company(&self, identity: &Identity) -> Result<Option<CompanyProfile>, DomainError> {
        let state = self.state.read().await;
        match state.employers.get(identity) {
            Some(record) => Ok(record.company.clone()),
            None => Err(DomainError::not_found("Employer")),
        }
    }

    async fn set_payment_method(&self, identity: &Identity, method: PaymentMethod) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let record = state.employer_mut(identity)?;
        record.payment_method = Some(method);
        record.employer.updated_at = Utc::now();
        Ok(())
    }

    async fn set_payment_details(&self, identity: &Identity, details: &PaymentDetails) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let record = state.employer_mut(identity)?;
        record.payment_details = Some(details.clone());
        record.employer.updated_at = Utc::now();
        Ok(())
    }
}
