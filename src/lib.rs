//! Fresh Grad Jobs API
//!
//! Authentication core of the job board:
//! - Email/password sign-in against the users table
//! - HS256 bearer tokens carrying the account's id and role
//! - Per-route role gates for admin, employer and fresh graduate areas

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::DatabaseConfig;
use domain::IdentityRepository;
use infrastructure::{
    auth::{
        Argon2Hasher, AuthService, CredentialVerifier, SignInPolicy, TokenIssuer, TokenVerifier,
    },
    identity::{InMemoryIdentityRepository, MySqlIdentityRepository},
};
use tracing::{info, warn};

/// Create the application state with custom configuration
///
/// Fails when no signing secret is configured.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = create_identity_repository(&config.database)?;

    build_app_state(config, repository)
}

/// Pick the data store adapter for the configured database
pub fn create_identity_repository(
    config: &DatabaseConfig,
) -> anyhow::Result<Arc<dyn IdentityRepository>> {
    match &config.url {
        Some(url) => {
            let repository = MySqlIdentityRepository::connect_lazy(
                url,
                config.max_connections,
                config.acquire_timeout(),
            )?;
            info!(
                max_connections = config.max_connections,
                "Using MySQL identity repository"
            );
            Ok(Arc::new(repository))
        }
        None => {
            warn!("No database URL configured, using empty in-memory identity repository");
            Ok(Arc::new(InMemoryIdentityRepository::new()))
        }
    }
}

/// Wire token handling and sign-in around an identity repository
pub fn build_app_state(
    config: &AppConfig,
    repository: Arc<dyn IdentityRepository>,
) -> anyhow::Result<AppState> {
    let token_config = config.auth.token_config()?;
    let issuer = Arc::new(TokenIssuer::new(&token_config));
    let verifier = Arc::new(TokenVerifier::new(&token_config));

    let lookup_timeout = config.database.lookup_timeout();
    let credentials = CredentialVerifier::new(
        repository.clone(),
        Arc::new(Argon2Hasher::new()),
        lookup_timeout,
        config.auth.stored_hash_format(),
    )?;

    let policy = SignInPolicy {
        require_approval: config.auth.require_approval_at_signin,
        lookup_timeout,
    };
    let auth_service = Arc::new(AuthService::new(
        credentials,
        issuer.clone(),
        repository.clone(),
        policy,
    ));

    info!(
        issuer = %token_config.issuer,
        token_ttl_secs = issuer.ttl().num_seconds(),
        require_approval = policy.require_approval,
        "Auth services initialized"
    );

    Ok(AppState::new(auth_service, verifier, repository))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthError;

    #[test]
    fn test_build_app_state_requires_secret() {
        let config = AppConfig::default();
        let err = build_app_state(&config, Arc::new(InMemoryIdentityRepository::new()))
            .err()
            .expect("state without a secret");

        assert!(matches!(
            err.downcast_ref::<AuthError>(),
            Some(AuthError::SigningError(_))
        ));
    }

    #[test]
    fn test_in_memory_repository_without_url() {
        assert!(create_identity_repository(&DatabaseConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_create_app_state_with_secret() {
        let mut config = AppConfig::default();
        config.auth.secret = "lib-secret".to_string();
        config.auth.bcrypt_cost = 4;

        assert!(create_app_state_with_config(&config).await.is_ok());
    }
}
