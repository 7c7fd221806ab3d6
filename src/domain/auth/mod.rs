//! Authentication domain
//!
//! Token claims, the verified caller identity, and the error taxonomy shared
//! by sign-in, token verification, and the role gate.

mod claims;
mod error;

pub use claims::{AuthenticatedIdentity, Claims};
pub use error::AuthError;
