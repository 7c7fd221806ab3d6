//! Identity entity and related types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric identifier of a user row in the data store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(i64);

impl IdentityId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for IdentityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for IdentityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of an account on the job board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "employer")]
    Employer,
    #[serde(rename = "freshGrad")]
    FreshGrad,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Employer, Role::FreshGrad];

    /// Wire and storage representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employer => "employer",
            Self::FreshGrad => "freshGrad",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored or submitted role name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "employer" => Ok(Self::Employer),
            "freshGrad" => Ok(Self::FreshGrad),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A user account as the auth core sees it
///
/// Owned by the data store. The auth core only ever reads it.
#[derive(Clone)]
pub struct Identity {
    id: IdentityId,
    role: Role,
    email: String,
    password_hash: String,
    approved: bool,
    suspended: bool,
}

impl Identity {
    pub fn new(
        id: IdentityId,
        role: Role,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            role,
            email: email.into(),
            password_hash: password_hash.into(),
            approved: false,
            suspended: false,
        }
    }

    pub fn with_approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }

    pub fn with_suspended(mut self, suspended: bool) -> Self {
        self.suspended = suspended;
        self
    }

    pub fn id(&self) -> IdentityId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password_hash", &"[hidden]")
            .field("approved", &self.approved)
            .field("suspended", &self.suspended)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_serde_uses_camel_case_fresh_grad() {
        let json = serde_json::to_string(&Role::FreshGrad).unwrap();
        assert_eq!(json, "\"freshGrad\"");

        let role: Role = serde_json::from_str("\"employer\"").unwrap();
        assert_eq!(role, Role::Employer);
    }

    #[test]
    fn test_unknown_role() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown role: superuser");
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_identity_defaults() {
        let identity = Identity::new(IdentityId::new(7), Role::Employer, "a@x.com", "hash");

        assert_eq!(identity.id().value(), 7);
        assert!(!identity.is_approved());
        assert!(!identity.is_suspended());
    }

    #[test]
    fn test_identity_debug_hides_hash() {
        let identity =
            Identity::new(IdentityId::new(1), Role::Admin, "a@x.com", "$argon2id$secret");
        let debug = format!("{:?}", identity);

        assert!(!debug.contains("$argon2id$secret"));
        assert!(debug.contains("[hidden]"));
    }
}
