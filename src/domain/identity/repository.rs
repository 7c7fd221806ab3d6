//! Identity repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Identity, IdentityId, Role};
use crate::domain::DomainError;

/// Read-only view of the data store used by the auth core
///
/// These are the only outward calls the auth core makes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Look up the credential record for an email address
    async fn lookup_credential(&self, email: &str) -> Result<Option<Identity>, DomainError>;

    /// Look up the currently stored role for an identity
    async fn lookup_role(&self, id: IdentityId) -> Result<Option<Role>, DomainError>;

    /// Check the data store is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
