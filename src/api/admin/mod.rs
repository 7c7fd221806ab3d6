//! Admin-only routes

use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::api::auth::current_identity;
use crate::api::middleware::{role_gate, RoleGate};
use crate::api::state::AppState;
use crate::domain::Role;
use crate::infrastructure::auth::TokenVerifier;

/// Routes under `/admin`, reachable with an admin token only
pub fn create_admin_router(verifier: Arc<TokenVerifier>) -> Router<AppState> {
    Router::new()
        .route("/me", get(current_identity))
        .route_layer(middleware::from_fn_with_state(
            RoleGate::only(verifier, Role::Admin),
            role_gate,
        ))
}
