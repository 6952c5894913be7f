//! Registration progress tracker
//!
//! Called after a setup action's own write has succeeded. An action only
//! moves the employer forward when the stored step is exactly the one the
//! action belongs to; otherwise the call is a silent no-op and the caller
//! gets [`StepTransition::Unchanged`]. That no-op is not an error.

use std::sync::Arc;

use crate::domain::entities::{RegistrationStep, SetupAction, StepTransition};
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::RegistrationStepRepository;

pub struct RegistrationTracker<R: RegistrationStepRepository> {
    repository: Arc<R>,
}

impl<R: RegistrationStepRepository> Clone for RegistrationTracker<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<R: RegistrationStepRepository> RegistrationTracker<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Current onboarding step
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - The identity has no employer record
    pub async fn current_step(&self, identity: &Identity) -> DomainResult<RegistrationStep> {
        self.repository
            .find_step(identity)
            .await?
            .ok_or_else(|| DomainError::not_found("Employer"))
    }

    /// Record that `action` completed for `identity`
    ///
    /// The advance itself is a single compare-and-set in storage, so two
    /// concurrent completions of the same action advance the step once.
    pub async fn complete_step(
        &self,
        identity: &Identity,
        action: SetupAction,
    ) -> DomainResult<StepTransition> {
        let current = self.current_step(identity).await?;

        let Some(next) = action.transition_from(current) else {
            tracing::debug!(
                identity = %identity,
                action = %action,
                current = %current,
                "Setup action does not match current step; step unchanged"
            );
            return Ok(StepTransition::Unchanged { current });
        };

        if self.repository.advance_step(identity, current, next).await? {
            tracing::info!(
                identity = %identity,
                from = %current,
                to = %next,
                "Registration step advanced"
            );
            return Ok(StepTransition::Advanced { from: current, to: next });
        }

        // Someone else moved the step between the read and the write.
        let current = self.current_step(identity).await?;
        tracing::debug!(
            identity = %identity,
            action = %action,
            current = %current,
            "Registration step changed concurrently; step unchanged"
        );
        Ok(StepTransition::Unchanged { current })
    }
}
