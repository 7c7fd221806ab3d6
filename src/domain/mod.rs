//! Domain layer - Core entities, errors, and repository traits

pub mod auth;
pub mod error;
pub mod identity;

pub use auth::{AuthError, AuthenticatedIdentity, Claims};
pub use error::DomainError;
pub use identity::{Identity, IdentityId, IdentityRepository, Role};
