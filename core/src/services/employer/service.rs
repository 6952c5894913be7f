//! Onboarding actions for a signed-in employer
//!
//! Each update writes its data and then offers the matching [`SetupAction`] to
//! the registration tracker, which advances the step only when it is the
//! current one. Out-of-order updates still save their data.

use std::sync::Arc;

use jb_shared::utils::validation::{validators, ValidationErrors};

use crate::domain::entities::{
    AccountUpdate, CompanyProfile, EmployerProfile, PaymentDetails, PaymentMethod, RegistrationStep,
    SetupAction,
};
use crate::domain::value_objects::Identity;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{CredentialRepository, EmployerRepository, RegistrationStepRepository};
use crate::services::password::PasswordService;
use crate::services::registration::RegistrationTracker;

fn required(errors: ValidationErrors) -> DomainResult<()> {
    if errors.is_empty() {
        return Ok(());
    }
    Err(ValidationError::RequiredFields {
        fields: errors.fields(),
    }
    .into())
}

/// Onboarding and profile operations for an authenticated employer
pub struct EmployerService<R>
where
    R: EmployerRepository + CredentialRepository + RegistrationStepRepository,
{
    repository: Arc<R>,
    passwords: Arc<PasswordService>,
    tracker: RegistrationTracker<R>,
}

impl<R> EmployerService<R>
where
    R: EmployerRepository + CredentialRepository + RegistrationStepRepository,
{
    pub fn new(repository: Arc<R>, passwords: Arc<PasswordService>) -> Self {
        Self {
            tracker: RegistrationTracker::new(repository.clone()),
            repository,
            passwords,
        }
    }

    /// Replace the password after checking the current one
    ///
    /// # Returns
    /// * `Ok(RegistrationStep)` - Step after the tracker was consulted
    /// * `Err(AuthError::PasswordMismatch)` - `current` does not match
    pub async fn update_password(
        &self,
        identity: &Identity,
        current: &str,
        new_password: &str,
    ) -> DomainResult<RegistrationStep> {
        let mut errors = ValidationErrors::new();
        errors.require("password", current);
        errors.require("newpassword", new_password);
        required(errors)?;

        let digest = self
            .repository
            .find_credential(identity)
            .await?
            .ok_or_else(|| DomainError::not_found("Employer"))?;

        if !self.passwords.verify(&digest, current) {
            tracing::debug!(identity = %identity, "Password change rejected: current password mismatch");
            return Err(AuthError::PasswordMismatch.into());
        }

        let digest = self.passwords.hash(new_password)?;
        self.repository.store_credential(identity, digest).await?;
        tracing::info!(identity = %identity, "Password changed");

        let transition = self
            .tracker
            .complete_step(identity, SetupAction::ChangePassword)
            .await?;
        Ok(transition.current())
    }

    /// Update personal/account details; blank fields keep their stored value
    pub async fn update_account(
        &self,
        identity: &Identity,
        update: AccountUpdate,
    ) -> DomainResult<EmployerProfile> {
        if !update.email.trim().is_empty() && !validators::is_valid_email(&update.email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let mut employer = self
            .repository
            .find_by_identity(identity)
            .await?
            .ok_or_else(|| DomainError::not_found("Employer"))?;

        employer.apply(&update);
        self.repository.update_account(&employer).await?;

        let transition = self
            .tracker
            .complete_step(identity, SetupAction::UpdatePersonalInformation)
            .await?;
        employer.registration_step = transition.current();

        Ok(employer.profile())
    }

    pub async fn update_company(
        &self,
        identity: &Identity,
        company: CompanyProfile,
    ) -> DomainResult<RegistrationStep> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &company.name);
        required(errors)?;

        if !company.website.trim().is_empty() && !validators::is_valid_url(company.website.trim()) {
            return Err(ValidationError::InvalidFormat {
                field: "website".to_string(),
            }
            .into());
        }

        self.repository.update_company(identity, &company).await?;

        let transition = self
            .tracker
            .complete_step(identity, SetupAction::UpdateCompanyDetails)
            .await?;
        Ok(transition.current())
    }

    pub async fn set_payment_method(
        &self,
        identity: &Identity,
        method: PaymentMethod,
    ) -> DomainResult<RegistrationStep> {
        self.repository.set_payment_method(identity, method).await?;

        let transition = self
            .tracker
            .complete_step(identity, SetupAction::SetPaymentMethod)
            .await?;
        Ok(transition.current())
    }

    pub async fn set_payment_details(
        &self,
        identity: &Identity,
        details: PaymentDetails,
    ) -> DomainResult<RegistrationStep> {
        let mut errors = ValidationErrors::new();
        errors.require("billingname", &details.billing_name);
        errors.require("billingaddress", &details.billing_address);
        required(errors)?;

        if !details.billing_email.trim().is_empty() && !validators::is_valid_email(&details.billing_email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        self.repository.set_payment_details(identity, &details).await?;

        let transition = self
            .tracker
            .complete_step(identity, SetupAction::SetPaymentDetails)
            .await?;
        Ok(transition.current())
    }

    /// Employer profile including the current onboarding step
    pub async fn get_employer(&self, identity: &Identity) -> DomainResult<EmployerProfile> {
        let mut employer = self
            .repository
            .find_by_identity(identity)
            .await?
            .ok_or_else(|| DomainError::not_found("Employer"))?;
        employer.registration_step = self.tracker.current_step(identity).await?;
        Ok(employer.profile())
    }

    /// Company profile, `None` until the employer has saved one
    pub async fn get_company(&self, identity: &Identity) -> DomainResult<Option<CompanyProfile>> {
        self.repository.find_company(identity).await
    }
}
