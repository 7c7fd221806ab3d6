//! HS256 token issuance and verification

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::fmt::Debug;
use tracing::debug;

use crate::domain::auth::{AuthError, AuthenticatedIdentity, Claims};
use crate::domain::identity::{IdentityId, Role};

/// Default token lifetime in seconds
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Longest token lifetime in seconds
pub const MAX_TOKEN_TTL_SECS: u64 = 86_400 * 30;

/// HMAC signing secret, loaded once at startup
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap a secret, refusing an empty one
    pub fn new(secret: impl Into<String>) -> Result<Self, AuthError> {
        let secret = secret.into();

        if secret.trim().is_empty() {
            return Err(AuthError::SigningError(
                "signing secret is not configured".to_string(),
            ));
        }

        Ok(Self(secret.into_bytes()))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret([hidden])")
    }
}

/// Settings shared by the issuer and the verifier
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: SigningSecret,
    pub issuer: String,
    pub ttl: Duration,
}

impl TokenConfig {
    /// `ttl_secs` is capped at [`MAX_TOKEN_TTL_SECS`]
    pub fn new(secret: SigningSecret, issuer: impl Into<String>, ttl_secs: u64) -> Self {
        let ttl_secs = ttl_secs.min(MAX_TOKEN_TTL_SECS) as i64;

        Self {
            secret,
            issuer: issuer.into(),
            ttl: Duration::seconds(ttl_secs),
        }
    }
}

/// Builds signed, time-bound claims tokens
#[derive(Clone)]
pub struct TokenIssuer {
    issuer: String,
    ttl: Duration,
    encoding_key: EncodingKey,
}

impl Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .field("encoding_key", &"[hidden]")
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            issuer: config.issuer.clone(),
            ttl: config.ttl,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Issue a token for `id`/`role` valid from now
    pub fn issue(&self, id: IdentityId, role: Role) -> Result<String, AuthError> {
        self.issue_at(id, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        id: IdentityId,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims::new(id, role, &self.issuer, now, self.ttl);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningError(e.to_string()))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Parses and validates bearer tokens
///
/// Never touches the data store. A role or approval change made after
/// issuance is only picked up once the token expires and a new one is issued.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
}

impl Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Verify a token and return the caller it identifies
    pub fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        self.verify_claims(token).map(|claims| claims.identity())
    }

    /// Verify a token and return its full claims
    pub fn verify_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| match raw_header_alg(token) {
            Some(alg) if !matches!(alg.as_str(), "HS256" | "HS384" | "HS512") => {
                AuthError::UnexpectedSigningMethod(alg)
            }
            _ => {
                debug!(error = %e, "Token header could not be parsed");
                AuthError::MalformedToken
            }
        })?;

        if !is_hmac(header.alg) {
            return Err(AuthError::UnexpectedSigningMethod(format!("{:?}", header.alg)));
        }

        let mut validation = Validation::new(header.alg);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        // Signature and expiry are checked against an untyped payload first so
        // that shape errors in our own claims surface as MissingClaim.
        let data = decode::<serde_json::Value>(token, &self.decoding_key, &validation)
            .map_err(map_jwt_error)?;

        serde_json::from_value::<Claims>(data.claims)
            .map_err(|e| AuthError::MissingClaim(e.to_string()))
    }
}

/// `alg` of a header jsonwebtoken has no variant for, such as `none`
fn raw_header_alg(token: &str) -> Option<String> {
    let (header, _) = token.split_once('.')?;
    let bytes = URL_SAFE_NO_PAD.decode(header).ok()?;
    let header: serde_json::Value = serde_json::from_slice(&bytes).ok()?;

    header.get("alg")?.as_str().map(str::to_string)
}

fn is_hmac(alg: Algorithm) -> bool {
    matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.clone()),
        ErrorKind::InvalidAlgorithm => AuthError::UnexpectedSigningMethod("mismatch".to_string()),
        _ => {
            debug!(error = %err, "Token rejected as malformed");
            AuthError::MalformedToken
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "test-secret-key-12345";

    fn config() -> TokenConfig {
        TokenConfig::new(SigningSecret::new(SECRET).unwrap(), "fresh-grad-jobs", 3600)
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&config())
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(&config())
    }

    /// Sign an arbitrary payload with the test secret
    fn sign_raw(payload: serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify_every_role() {
        let issuer = issuer();
        let verifier = verifier();

        for (n, role) in Role::ALL.into_iter().enumerate() {
            let id = IdentityId::new(n as i64 + 1);
            let token = issuer.issue(id, role).unwrap();

            let identity = verifier.verify(&token).unwrap();
            assert_eq!(identity.id, id);
            assert_eq!(identity.role, role);
        }
    }

    #[test]
    fn test_token_has_three_segments_and_claims() {
        let token = issuer().issue(IdentityId::new(9), Role::Employer).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = verifier().verify_claims(&token).unwrap();
        assert_eq!(claims.iss, "fresh-grad-jobs");
        assert!(claims.exp > Utc::now().timestamp());

        let header = decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_expiry_is_one_hour_from_issuance() {
        let now = Utc::now();
        let token = issuer()
            .issue_at(IdentityId::new(1), Role::Admin, now)
            .unwrap();

        let claims = verifier().verify_claims(&token).unwrap();
        assert_eq!(claims.exp, now.timestamp() + 3600);
    }

    #[test]
    fn test_expired_one_second_ago() {
        let token = sign_raw(json!({
            "id": 1, "role": "admin", "iss": "fresh-grad-jobs",
            "exp": Utc::now().timestamp() - 1
        }));

        assert_eq!(verifier().verify(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_valid_for_one_more_second() {
        let token = sign_raw(json!({
            "id": 1, "role": "admin", "iss": "fresh-grad-jobs",
            "exp": Utc::now().timestamp() + 1
        }));

        assert!(verifier().verify(&token).is_ok());
    }

    #[test]
    fn test_issued_long_ago_is_expired() {
        let token = issuer()
            .issue_at(IdentityId::new(1), Role::Admin, Utc::now() - Duration::hours(2))
            .unwrap();

        assert_eq!(verifier().verify(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_tampered_signature() {
        let token = issuer().issue(IdentityId::new(5), Role::Employer).unwrap();
        let (signed_part, signature) = token.rsplit_once('.').unwrap();

        let mut bytes = signature.as_bytes().to_vec();
        bytes[0] = if bytes[0] == b'A' { b'B' } else { b'A' };
        let tampered = format!("{}.{}", signed_part, String::from_utf8(bytes).unwrap());

        assert_eq!(verifier().verify(&tampered), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_tampered_payload() {
        let token = issuer().issue(IdentityId::new(5), Role::Employer).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged = URL_SAFE_NO_PAD.encode(
            json!({
                "id": 5, "role": "admin", "iss": "fresh-grad-jobs",
                "exp": Utc::now().timestamp() + 3600
            })
            .to_string(),
        );
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert_eq!(verifier().verify(&tampered), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_wrong_secret() {
        let other =
            TokenConfig::new(SigningSecret::new("secret-2").unwrap(), "fresh-grad-jobs", 3600);
        let token = TokenIssuer::new(&other)
            .issue(IdentityId::new(1), Role::Admin)
            .unwrap();

        assert_eq!(verifier().verify(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_malformed_token() {
        assert_eq!(verifier().verify("invalid-token"), Err(AuthError::MalformedToken));
        assert_eq!(verifier().verify(""), Err(AuthError::MalformedToken));
        assert_eq!(verifier().verify("a.b.c"), Err(AuthError::MalformedToken));
    }

    #[test]
    fn test_non_hmac_algorithm_rejected() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            json!({
                "id": 1, "role": "admin", "iss": "fresh-grad-jobs",
                "exp": Utc::now().timestamp() + 3600
            })
            .to_string(),
        );
        let token = format!("{}.{}.c2lnbmF0dXJl", header, payload);

        assert!(matches!(
            verifier().verify(&token),
            Err(AuthError::UnexpectedSigningMethod(_))
        ));
    }

    #[test]
    fn test_alg_none_is_unexpected_signing_method() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            json!({
                "id": 1, "role": "admin", "iss": "fresh-grad-jobs",
                "exp": Utc::now().timestamp() + 3600
            })
            .to_string(),
        );
        let token = format!("{}.{}.", header, payload);

        assert_eq!(
            verifier().verify(&token),
            Err(AuthError::UnexpectedSigningMethod("none".to_string()))
        );
    }

    #[test]
    fn test_unparseable_header_with_hmac_alg_is_malformed() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":7}"#);
        let token = format!("{}.e30.c2ln", header);

        assert_eq!(verifier().verify(&token), Err(AuthError::MalformedToken));
    }

    #[test]
    fn test_hs512_token_accepted() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &json!({
                "id": 2, "role": "employer", "iss": "fresh-grad-jobs",
                "exp": Utc::now().timestamp() + 60
            }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let identity = verifier().verify(&token).unwrap();
        assert_eq!(identity.role, Role::Employer);
    }

    #[test]
    fn test_missing_role_claim() {
        let token = sign_raw(json!({
            "id": 1, "iss": "fresh-grad-jobs", "exp": Utc::now().timestamp() + 60
        }));

        assert!(matches!(verifier().verify(&token), Err(AuthError::MissingClaim(_))));
    }

    #[test]
    fn test_missing_id_claim() {
        let token = sign_raw(json!({
            "role": "admin", "iss": "fresh-grad-jobs", "exp": Utc::now().timestamp() + 60
        }));

        assert!(matches!(verifier().verify(&token), Err(AuthError::MissingClaim(_))));
    }

    #[test]
    fn test_wrongly_typed_id_claim() {
        let token = sign_raw(json!({
            "id": "1", "role": "admin", "iss": "fresh-grad-jobs",
            "exp": Utc::now().timestamp() + 60
        }));

        assert!(matches!(verifier().verify(&token), Err(AuthError::MissingClaim(_))));
    }

    #[test]
    fn test_unknown_role_claim() {
        let token = sign_raw(json!({
            "id": 1, "role": "root", "iss": "fresh-grad-jobs",
            "exp": Utc::now().timestamp() + 60
        }));

        assert!(matches!(verifier().verify(&token), Err(AuthError::MissingClaim(_))));
    }

    #[test]
    fn test_missing_exp_claim() {
        let token = sign_raw(json!({ "id": 1, "role": "admin", "iss": "fresh-grad-jobs" }));

        assert_eq!(
            verifier().verify(&token),
            Err(AuthError::MissingClaim("exp".to_string()))
        );
    }

    #[test]
    fn test_ttl_capped() {
        let config = TokenConfig::new(SigningSecret::new(SECRET).unwrap(), "x", u64::MAX);
        assert_eq!(config.ttl, Duration::days(30));
    }

    #[test]
    fn test_empty_secret_is_signing_error() {
        assert!(matches!(SigningSecret::new(""), Err(AuthError::SigningError(_))));
        assert!(matches!(SigningSecret::new("   "), Err(AuthError::SigningError(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = config();

        assert!(!format!("{:?}", config).contains(SECRET));
        assert!(!format!("{:?}", TokenIssuer::new(&config)).contains(SECRET));
        assert!(!format!("{:?}", TokenVerifier::new(&config)).contains(SECRET));
    }
}
