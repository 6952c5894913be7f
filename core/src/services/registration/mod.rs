//! Employer registration progress tracking

mod tracker;

#[cfg(test)]
mod tests;

pub use tracker::RegistrationTracker;
