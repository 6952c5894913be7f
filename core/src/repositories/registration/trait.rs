//! Registration step storage.

use async_trait::async_trait;

use crate::domain::entities::RegistrationStep;
use crate::domain::value_objects::Identity;
use crate::errors::DomainError;

/// Repository trait for the employer onboarding step
#[async_trait]
pub trait RegistrationStepRepository: Send + Sync {
    /// Current step, `None` when the identity has no employer record
    async fn find_step(&self, identity: &Identity) -> Result<Option<RegistrationStep>, DomainError>;

    /// Atomically move from `expected` to `next`
    ///
    /// The write happens only if the stored step still equals `expected`
    /// at the moment of the update; concurrent callers cannot both win.
    ///
    /// # Returns
    /// * `Ok(true)` - The step was advanced
    /// * `Ok(false)` - The stored step differed, or no such employer
    async fn advance_step(
        &self,
        identity: &Identity,
        expected: RegistrationStep,
        next: RegistrationStep,
    ) -> Result<bool, DomainError>;
}
