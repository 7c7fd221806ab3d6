//! Authentication and authorization error taxonomy

use thiserror::Error;

/// Every way sign-in, token handling, or the role gate can fail
///
/// Messages are returned to clients as-is, so they never carry the signing
/// secret, a password hash, or data store internals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Your account is suspended")]
    AccountSuspended,

    #[error("Your account is not approved")]
    AccountNotApproved,

    #[error("Authorization header missing or malformed")]
    AuthHeaderMissing,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Missing or invalid claim: {0}")]
    MissingClaim(String),

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Data store unavailable")]
    DataStoreUnavailable,

    #[error("Token signing failed: {0}")]
    SigningError(String),
}

impl AuthError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::AccountSuspended => "account_suspended",
            Self::AccountNotApproved => "account_not_approved",
            Self::AuthHeaderMissing => "auth_header_missing",
            Self::MalformedToken => "malformed_token",
            Self::UnexpectedSigningMethod(_) => "unexpected_signing_method",
            Self::InvalidSignature => "invalid_signature",
            Self::TokenExpired => "token_expired",
            Self::MissingClaim(_) => "missing_claim",
            Self::InsufficientPermissions => "insufficient_permissions",
            Self::DataStoreUnavailable => "data_store_unavailable",
            Self::SigningError(_) => "signing_error",
        }
    }

    /// True for failures of the bearer token itself (header, structure, signature, claims)
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            Self::AuthHeaderMissing
                | Self::MalformedToken
                | Self::UnexpectedSigningMethod(_)
                | Self::InvalidSignature
                | Self::TokenExpired
                | Self::MissingClaim(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_matches_signin_contract() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_kinds_are_snake_case() {
        assert_eq!(AuthError::TokenExpired.kind(), "token_expired");
        assert_eq!(
            AuthError::UnexpectedSigningMethod("RS256".into()).kind(),
            "unexpected_signing_method"
        );
        assert_eq!(AuthError::InsufficientPermissions.kind(), "insufficient_permissions");
    }

    #[test]
    fn test_token_rejections() {
        assert!(AuthError::InvalidSignature.is_token_rejection());
        assert!(AuthError::AuthHeaderMissing.is_token_rejection());
        assert!(!AuthError::InsufficientPermissions.is_token_rejection());
        assert!(!AuthError::InvalidCredentials.is_token_rejection());
    }
}
