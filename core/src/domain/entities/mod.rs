//! Domain entities representing core business objects.

mod employer;
mod registration;

// Re-export commonly used types
pub use employer::{
    AccountUpdate, CompanyProfile, Employer, EmployerProfile, PaymentDetails, PaymentMethod,
};
pub use registration::{RegistrationStep, SetupAction, StepTransition};
