//! Employer setup operations
//!
//! Every write here is one of the onboarding actions; after the write
//! succeeds the registration tracker is consulted.

mod service;

#[cfg(test)]
mod tests;

pub use service::EmployerService;
