//! Sign-in and token refresh orchestration

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::auth::AuthError;
use crate::domain::identity::{IdentityId, IdentityRepository, Role};

use super::credentials::{with_timeout, CredentialVerifier};
use super::token::TokenIssuer;

/// Sign-in policy knobs
#[derive(Debug, Clone, Copy)]
pub struct SignInPolicy {
    /// Refuse non-admin accounts that have not been approved yet
    pub require_approval: bool,
    pub lookup_timeout: Duration,
}

/// Issues tokens for verified credentials and refreshes them
pub struct AuthService {
    credentials: CredentialVerifier,
    issuer: Arc<TokenIssuer>,
    repository: Arc<dyn IdentityRepository>,
    policy: SignInPolicy,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("credentials", &self.credentials)
            .field("issuer", &self.issuer)
            .field("policy", &self.policy)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        credentials: CredentialVerifier,
        issuer: Arc<TokenIssuer>,
        repository: Arc<dyn IdentityRepository>,
        policy: SignInPolicy,
    ) -> Self {
        Self {
            credentials,
            issuer,
            repository,
            policy,
        }
    }

    /// Check credentials and account standing, then issue a token
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        info!(email = %email, "Sign-in attempt");

        let verified = self.credentials.verify(email, password).await.inspect_err(|e| {
            warn!(email = %email, reason = e.kind(), "Sign-in rejected");
        })?;

        if verified.suspended {
            warn!(user_id = %verified.id, "Sign-in refused for suspended account");
            return Err(AuthError::AccountSuspended);
        }

        if self.policy.require_approval && verified.role != Role::Admin && !verified.approved {
            warn!(user_id = %verified.id, "Sign-in refused for unapproved account");
            return Err(AuthError::AccountNotApproved);
        }

        let token = self
            .issuer
            .issue(verified.id, verified.role)
            .inspect_err(log_signing_failure(verified.id))?;

        info!(user_id = %verified.id, role = %verified.role, "User signed in");

        Ok(token)
    }

    /// Issue a new token carrying the role currently stored for `id`
    pub async fn refresh(&self, id: IdentityId) -> Result<String, AuthError> {
        let role = with_timeout(self.policy.lookup_timeout, self.repository.lookup_role(id))
            .await?
            .ok_or_else(|| {
                warn!(user_id = %id, "Refresh refused for unknown account");
                AuthError::InvalidCredentials
            })?;

        let token = self
            .issuer
            .issue(id, role)
            .inspect_err(log_signing_failure(id))?;

        info!(user_id = %id, role = %role, "Token refreshed");

        Ok(token)
    }
}

/// Signing errors reach clients only as a bare 500, so the cause is logged here
fn log_signing_failure(id: IdentityId) -> impl FnOnce(&AuthError) {
    move |e| error!(error = %e, user_id = %id, "Failed to issue token")
}
