//! Bearer token role gate
//!
//! Every protected route sits behind a [`RoleGate`]. It verifies the bearer
//! token, checks the role recorded in it against the roles the route admits,
//! and stores the verified [`AuthenticatedIdentity`] in the request
//! extensions for the handler.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::api::types::ApiError;
use crate::domain::{AuthError, AuthenticatedIdentity, Role};
use crate::infrastructure::auth::TokenVerifier;

/// Token verifier plus the roles admitted by one group of routes
#[derive(Debug, Clone)]
pub struct RoleGate {
    verifier: Arc<TokenVerifier>,
    allowed: Arc<[Role]>,
}

impl RoleGate {
    pub fn new(verifier: Arc<TokenVerifier>, allowed: impl Into<Arc<[Role]>>) -> Self {
        Self {
            verifier,
            allowed: allowed.into(),
        }
    }

    /// Gate admitting a single role
    pub fn only(verifier: Arc<TokenVerifier>, role: Role) -> Self {
        Self::new(verifier, vec![role])
    }

    /// Gate admitting any signed-in role
    pub fn any_role(verifier: Arc<TokenVerifier>) -> Self {
        Self::new(verifier, Role::ALL.to_vec())
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Authenticate the request headers, then authorize the role
    pub fn check(&self, headers: &HeaderMap) -> Result<AuthenticatedIdentity, AuthError> {
        let token = extract_bearer_token(headers)?;
        let identity = self.verifier.verify(token)?;

        if !self.allows(identity.role) {
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(identity)
    }
}

/// Token after the `Bearer ` prefix of the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::AuthHeaderMissing)
}

/// Middleware for `axum::middleware::from_fn_with_state`
pub async fn role_gate(
    State(gate): State<RoleGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = gate.check(request.headers()).map_err(|e| {
        let path = request.uri().path();
        if e.is_token_rejection() {
            debug!(path = %path, reason = e.kind(), "Unauthenticated request");
        } else {
            warn!(path = %path, reason = e.kind(), "Request rejected by role gate");
        }
        ApiError::from(e)
    })?;

    debug!(user_id = %identity.id, role = %identity.role, "Request authorized");

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .copied()
            .ok_or_else(|| AuthError::AuthHeaderMissing.into())
    }
}
