//! Employer routes

use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::api::auth::current_identity;
use crate::api::middleware::{role_gate, RoleGate};
use crate::api::state::AppState;
use crate::domain::Role;
use crate::infrastructure::auth::TokenVerifier;

pub fn create_employer_router(verifier: Arc<TokenVerifier>) -> Router<AppState> {
    Router::new()
        .route("/me", get(current_identity))
        .route_layer(middleware::from_fn_with_state(
            RoleGate::only(verifier, Role::Employer),
            role_gate,
        ))
}
