//! Application state for shared services

use std::sync::Arc;

use crate::domain::IdentityRepository;
use crate::infrastructure::auth::{AuthService, TokenVerifier};

/// Services shared by every handler and by the role gates
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub token_verifier: Arc<TokenVerifier>,
    pub identity_repository: Arc<dyn IdentityRepository>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        token_verifier: Arc<TokenVerifier>,
        identity_repository: Arc<dyn IdentityRepository>,
    ) -> Self {
        Self {
            auth_service,
            token_verifier,
            identity_repository,
        }
    }
}
