//! Password hashing utilities using Argon2, with bcrypt verification for legacy hashes

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2-based password hasher
///
/// New hashes are Argon2id. Verification also accepts the `$2a$`/`$2b$`/`$2y$`
/// bcrypt hashes written by earlier deployments.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Create a new Argon2 hasher
    pub fn new() -> Self {
        Self
    }
}

/// Hash family of the stored credentials
///
/// Unknown-email sign-ins are checked against a throwaway hash of this family,
/// so they cost the same as a wrong password for a registered email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredHashFormat {
    Argon2,
    Bcrypt { cost: u32 },
}

impl StoredHashFormat {
    /// Hash of a random password in this format
    pub fn dummy_hash(self, hasher: &dyn PasswordHasher) -> Result<String, DomainError> {
        let throwaway = uuid::Uuid::new_v4().to_string();

        match self {
            Self::Argon2 => hasher.hash(&throwaway),
            Self::Bcrypt { cost } => bcrypt::hash(throwaway, cost)
                .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e))),
        }
    }
}

fn is_bcrypt_hash(hash: &str) -> bool {
    hash.starts_with("$2a$") || hash.starts_with("$2b$") || hash.starts_with("$2y$")
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        if is_bcrypt_hash(hash) {
            return bcrypt::verify(password, hash).unwrap_or(false);
        }

        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
