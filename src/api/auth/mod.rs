//! Sign-in and token refresh endpoints

use std::sync::Arc;

use axum::{extract::State, middleware, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::{role_gate, RoleGate};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Success};
use crate::domain::AuthenticatedIdentity;
use crate::infrastructure::auth::TokenVerifier;

/// Public sign-in plus token refresh for any signed-in role
pub fn create_auth_router(verifier: Arc<TokenVerifier>) -> Router<AppState> {
    let refresh = Router::new()
        .route("/token/refresh", post(refresh_token))
        .route_layer(middleware::from_fn_with_state(
            RoleGate::any_role(verifier),
            role_gate,
        ));

    Router::new().route("/signin", post(sign_in)).merge(refresh)
}

/// Sign-in request
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /signin
///
/// Returns `{status:"success", token}`. Unknown email and wrong password
/// both answer 401 with the same message.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<Success<TokenResponse>>, ApiError> {
    if let Err(errors) = request.validate() {
        debug!(errors = %errors, "Sign-in request failed validation");
        return Err(ApiError::bad_request("Invalid request format").with_code("invalid_request"));
    }

    let token = state
        .auth_service
        .sign_in(&request.email, &request.password)
        .await?;

    Ok(Json(Success::new(TokenResponse { token })))
}

/// POST /token/refresh
///
/// Re-reads the stored role and issues a fresh token for the caller.
pub async fn refresh_token(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
) -> Result<Json<Success<TokenResponse>>, ApiError> {
    let token = state.auth_service.refresh(identity.id).await?;

    Ok(Json(Success::new(TokenResponse { token })))
}

/// GET /{role}/me
///
/// Echoes the identity the role gate placed on the request.
pub async fn current_identity(
    identity: AuthenticatedIdentity,
) -> Json<Success<AuthenticatedIdentity>> {
    Json(Success::new(identity))
}
