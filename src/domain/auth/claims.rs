//! Token claims

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identity::{IdentityId, Role};

/// Signed payload of a bearer token
///
/// Fixed shape: decoding rejects unknown fields and fails on any missing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject identity
    pub id: IdentityId,
    /// Role recorded for the subject at issuance
    pub role: Role,
    /// Issuing application name
    pub iss: String,
    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(
        id: IdentityId,
        role: Role,
        issuer: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id,
            role,
            iss: issuer.into(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn identity(&self) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            id: self.id,
            role: self.role,
        }
    }
}

/// Verified caller, as forwarded by the role gate to downstream handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthenticatedIdentity {
    pub id: IdentityId,
    pub role: Role,
}
