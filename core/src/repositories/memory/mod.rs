//! In-memory implementation of every repository trait.
//!
//! Used by unit and HTTP tests, and by the server when no database is
//! configured.

mod store;


pub use store::InMemoryStore;
