//! Employer repository trait for account, company and billing data.

use async_trait::async_trait;

use crate::domain::entities::{CompanyProfile, Employer, PaymentDetails, PaymentMethod};
use crate::domain::value_objects::{Identity, PasswordDigest};
use crate::errors::DomainError;

/// Repository trait for Employer persistence operations
///
/// Update methods return `DomainError::NotFound` when the identity has no
/// employer record.
#[async_trait]
pub trait EmployerRepository: Send + Sync {
    /// Insert a new employer together with its initial credential
    ///
    /// # Returns
    /// * `Ok(Employer)` - The stored employer
    /// * `Err(AuthError::EmployerAlreadyExists)` - Email already registered
    async fn create(&self, employer: Employer, digest: PasswordDigest) -> Result<Employer, DomainError>;

    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<Employer>, DomainError>;

    /// Persist personal/account fields of an existing employer
    async fn update_account(&self, employer: &Employer) -> Result<(), DomainError>;

    /// Create or replace the employer's company profile
    async fn update_company(&self, identity: &Identity, company: &CompanyProfile) -> Result<(), DomainError>;

    async fn find_company(&self, identity: &Identity) -> Result<Option<CompanyProfile>, DomainError>;

    async fn set_payment_method(&self, identity: &Identity, method: PaymentMethod) -> Result<(), DomainError>;

    async fn set_payment_details(&self, identity: &Identity, details: &PaymentDetails) -> Result<(), DomainError>;
}
