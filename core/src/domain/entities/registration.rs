//! Employer onboarding steps and the setup actions that advance them.
//!
//! The sequence is fixed:
//!
//! ```text
//! change-password -> personal-information -> company-details
//!     -> payment-method -> payment-details -> registration-complete
//! ```
//!
//! Each [`SetupAction`] is only allowed to move an employer forward from
//! exactly one step. Anything else leaves the step untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Stage of the employer onboarding sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationStep {
    ChangePassword,
    PersonalInformation,
    CompanyDetails,
    PaymentMethod,
    PaymentDetails,
    RegistrationComplete,
}

impl RegistrationStep {
    /// All steps in canonical order
    pub const ALL: [RegistrationStep; 6] = [
        RegistrationStep::ChangePassword,
        RegistrationStep::PersonalInformation,
        RegistrationStep::CompanyDetails,
        RegistrationStep::PaymentMethod,
        RegistrationStep::PaymentDetails,
        RegistrationStep::RegistrationComplete,
    ];

    /// Step every new employer starts at
    pub fn initial() -> Self {
        RegistrationStep::ChangePassword
    }

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStep::ChangePassword => "change-password",
            RegistrationStep::PersonalInformation => "personal-information",
            RegistrationStep::CompanyDetails => "company-details",
            RegistrationStep::PaymentMethod => "payment-method",
            RegistrationStep::PaymentDetails => "payment-details",
            RegistrationStep::RegistrationComplete => "registration-complete",
        }
    }

    /// The following step, `None` once registration is complete
    pub fn next(&self) -> Option<RegistrationStep> {
        match self {
            RegistrationStep::ChangePassword => Some(RegistrationStep::PersonalInformation),
            RegistrationStep::PersonalInformation => Some(RegistrationStep::CompanyDetails),
            RegistrationStep::CompanyDetails => Some(RegistrationStep::PaymentMethod),
            RegistrationStep::PaymentMethod => Some(RegistrationStep::PaymentDetails),
            RegistrationStep::PaymentDetails => Some(RegistrationStep::RegistrationComplete),
            RegistrationStep::RegistrationComplete => None,
        }
    }
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStep {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegistrationStep::ALL
            .iter()
            .copied()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownRegistrationStep {
                value: s.to_string(),
            })
    }
}

/// Account setup operation whose success may advance the registration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupAction {
    /// Password changed after verifying the current one
    ChangePassword,
    /// Personal/account details updated
    UpdatePersonalInformation,
    /// Company profile updated
    UpdateCompanyDetails,
    /// Payment method chosen
    SetPaymentMethod,
    /// Billing details stored
    SetPaymentDetails,
}

impl SetupAction {
    /// All actions in canonical onboarding order
    pub const CANONICAL_ORDER: [SetupAction; 5] = [
        SetupAction::ChangePassword,
        SetupAction::UpdatePersonalInformation,
        SetupAction::UpdateCompanyDetails,
        SetupAction::SetPaymentMethod,
        SetupAction::SetPaymentDetails,
    ];

    /// The only step from which this action advances
    pub fn required_step(&self) -> RegistrationStep {
        match self {
            SetupAction::ChangePassword => RegistrationStep::ChangePassword,
            SetupAction::UpdatePersonalInformation => RegistrationStep::PersonalInformation,
            SetupAction::UpdateCompanyDetails => RegistrationStep::CompanyDetails,
            SetupAction::SetPaymentMethod => RegistrationStep::PaymentMethod,
            SetupAction::SetPaymentDetails => RegistrationStep::PaymentDetails,
        }
    }

    /// The step this action moves to
    pub fn resulting_step(&self) -> RegistrationStep {
        match self {
            SetupAction::ChangePassword => RegistrationStep::PersonalInformation,
            SetupAction::UpdatePersonalInformation => RegistrationStep::CompanyDetails,
            SetupAction::UpdateCompanyDetails => RegistrationStep::PaymentMethod,
            SetupAction::SetPaymentMethod => RegistrationStep::PaymentDetails,
            SetupAction::SetPaymentDetails => RegistrationStep::RegistrationComplete,
        }
    }

    /// Pure transition: `Some(next)` only when `current` is the required step
    pub fn transition_from(&self, current: RegistrationStep) -> Option<RegistrationStep> {
        (current == self.required_step()).then(|| self.resulting_step())
    }
}

impl fmt::Display for SetupAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SetupAction::ChangePassword => "change-password",
            SetupAction::UpdatePersonalInformation => "update-personal-information",
            SetupAction::UpdateCompanyDetails => "update-company-details",
            SetupAction::SetPaymentMethod => "set-payment-method",
            SetupAction::SetPaymentDetails => "set-payment-details",
        };
        f.write_str(name)
    }
}

/// Outcome of completing a setup action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTransition {
    Advanced {
        from: RegistrationStep,
        to: RegistrationStep,
    },
    /// The action did not match the current step; nothing was written
    Unchanged { current: RegistrationStep },
}

impl StepTransition {
    /// Step the employer is at after the action
    pub fn current(&self) -> RegistrationStep {
        match self {
            StepTransition::Advanced { to, .. } => *to,
            StepTransition::Unchanged { current } => *current,
        }
    }

    pub fn advanced(&self) -> bool {
        matches!(self, StepTransition::Advanced { .. })
    }
}
