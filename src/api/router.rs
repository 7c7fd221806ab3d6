use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::admin;
use super::auth;
use super::employer;
use super::freshgrad;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    let verifier = state.token_verifier.clone();

    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Sign-in (public) and token refresh (any role)
        .merge(auth::create_auth_router(verifier.clone()))
        // Role-scoped areas, each behind its own gate
        .nest("/admin", admin::create_admin_router(verifier.clone()))
        .nest("/employer", employer::create_employer_router(verifier.clone()))
        .nest("/freshgrad", freshgrad::create_freshgrad_router(verifier))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
