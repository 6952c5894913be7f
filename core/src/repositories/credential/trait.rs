//! Credential repository trait for password digest persistence.

use async_trait::async_trait;

use crate::domain::value_objects::{Identity, PasswordDigest};
use crate::errors::DomainError;

/// Repository trait for stored credentials
///
/// One digest per identity. Implementations never see plaintext secrets.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Look up the stored digest for an identity
    ///
    /// # Returns
    /// * `Ok(Some(digest))` - Credential found
    /// * `Ok(None)` - No account with this identity
    /// * `Err(DomainError)` - Storage failure
    async fn find_credential(&self, identity: &Identity) -> Result<Option<PasswordDigest>, DomainError>;

    /// Look up identity and digest by login email
    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(Identity, PasswordDigest)>, DomainError>;

    /// Replace the stored digest
    ///
    /// # Returns
    /// * `Ok(())` - Digest stored
    /// * `Err(DomainError::NotFound)` - No account with this identity
    async fn store_credential(&self, identity: &Identity, digest: PasswordDigest) -> Result<(), DomainError>;
}
