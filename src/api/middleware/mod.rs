//! API middleware components

pub mod logging;
pub mod role_gate;

pub use logging::logging_middleware;
pub use role_gate::{extract_bearer_token, role_gate, RoleGate};
