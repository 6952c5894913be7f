//! Account existence lookup used by the request authenticator.

use async_trait::async_trait;

use crate::domain::value_objects::{Account, Identity};
use crate::errors::DomainError;

/// Resolves an identity to its live account record.
///
/// This is the whole authorization check: a token is only as good as the
/// account it names still existing.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// # Returns
    /// * `Ok(Some(account))` - The identity names a live employer or applicant
    /// * `Ok(None)` - No such account
    /// * `Err(DomainError)` - Storage failure
    async fn find_account(&self, identity: &Identity) -> Result<Option<Account>, DomainError>;
}
