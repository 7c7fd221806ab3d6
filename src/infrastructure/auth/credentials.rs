//! Email/password verification against stored hashes

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::domain::auth::AuthError;
use crate::domain::identity::{IdentityId, IdentityRepository, Role};
use crate::domain::DomainError;

use super::password::{PasswordHasher, StoredHashFormat};

/// Default upper bound on a single data store lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of a successful credential check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedCredential {
    pub id: IdentityId,
    pub role: Role,
    pub approved: bool,
    pub suspended: bool,
}

/// Checks submitted email/password pairs
pub struct CredentialVerifier {
    repository: Arc<dyn IdentityRepository>,
    hasher: Arc<dyn PasswordHasher>,
    lookup_timeout: Duration,
    /// Compared against when the email is unknown, so both failure paths do the same work
    dummy_hash: String,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("hasher", &self.hasher)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

impl CredentialVerifier {
    pub fn new(
        repository: Arc<dyn IdentityRepository>,
        hasher: Arc<dyn PasswordHasher>,
        lookup_timeout: Duration,
        stored_format: StoredHashFormat,
    ) -> Result<Self, DomainError> {
        let dummy_hash = stored_format.dummy_hash(hasher.as_ref())?;

        Ok(Self {
            repository,
            hasher,
            lookup_timeout,
            dummy_hash,
        })
    }

    /// Verify `password` for the account registered under `email`
    pub async fn verify(
        &self,
        email: &str,
        password: &str,
    ) -> Result<VerifiedCredential, AuthError> {
        let identity = with_timeout(
            self.lookup_timeout,
            self.repository.lookup_credential(email),
        )
        .await?;

        let Some(identity) = identity else {
            let _ = self.hasher.verify(password, &self.dummy_hash);
            debug!(email = %email, "No account for email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, identity.password_hash()) {
            debug!(email = %email, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(VerifiedCredential {
            id: identity.id(),
            role: identity.role(),
            approved: identity.is_approved(),
            suspended: identity.is_suspended(),
        })
    }
}

/// Run a data store call under `limit`, mapping failures to `DataStoreUnavailable`
pub(crate) async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, AuthError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            error!(error = %e, "Data store lookup failed");
            Err(AuthError::DataStoreUnavailable)
        }
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "Data store lookup timed out");
            Err(AuthError::DataStoreUnavailable)
        }
    }
}
