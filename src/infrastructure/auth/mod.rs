//! Authentication infrastructure module
//!
//! Password hashing, credential verification, and HS256 token issuance and
//! verification.

mod credentials;
mod password;
mod service;
mod token;

pub use credentials::{CredentialVerifier, VerifiedCredential, DEFAULT_LOOKUP_TIMEOUT};
pub use password::{Argon2Hasher, PasswordHasher, StoredHashFormat};
pub use service::{AuthService, SignInPolicy};
pub use token::{
    SigningSecret, TokenConfig, TokenIssuer, TokenVerifier, DEFAULT_TOKEN_TTL_SECS,
    MAX_TOKEN_TTL_SECS,
};
