mod account;
mod credential;
mod employer;
mod memory;
mod registration;

pub use account::AccountRepository;
pub use credential::CredentialRepository;
pub use employer::EmployerRepository;
pub use memory::InMemoryStore;
pub use registration::RegistrationStepRepository;
