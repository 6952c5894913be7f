//! MySQL repository implementations

mod employer_repository_impl;

pub use employer_repository_impl::MySqlEmployerRepository;
