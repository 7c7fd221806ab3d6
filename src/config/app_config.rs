use std::time::Duration;

use serde::Deserialize;

use crate::domain::AuthError;
use crate::infrastructure::auth::{
    SigningSecret, StoredHashFormat, TokenConfig, DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS,
};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Token signing and sign-in policy
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC signing secret; the server refuses to start without one
    pub secret: String,
    /// Value of the `iss` claim
    pub issuer: String,
    pub token_ttl_secs: u64,
    pub require_approval_at_signin: bool,
    /// Hash family of the passwords in the users table
    pub password_hash_format: PasswordHashFormat,
    /// Cost of the bcrypt hashes in the users table
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PasswordHashFormat {
    Argon2,
    #[default]
    Bcrypt,
}

/// Data store connection; no `url` means the in-memory store
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_ms: u64,
    pub lookup_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: "fresh-grad-jobs".to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            require_approval_at_signin: false,
            password_hash_format: PasswordHashFormat::default(),
            bcrypt_cost: 10,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"[hidden]")
            .field("issuer", &self.issuer)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("require_approval_at_signin", &self.require_approval_at_signin)
            .field("password_hash_format", &self.password_hash_format)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AuthConfig {
    /// Build the token settings
    ///
    /// Fails with `SigningError` when no secret is set or the TTL is outside
    /// `1..=MAX_TOKEN_TTL_SECS`.
    pub fn token_config(&self) -> Result<TokenConfig, AuthError> {
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(AuthError::SigningError(format!(
                "token_ttl_secs must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_SECS, self.token_ttl_secs
            )));
        }

        let secret = SigningSecret::new(self.secret.clone())?;
        Ok(TokenConfig::new(secret, &self.issuer, self.token_ttl_secs))
    }

    /// Format of the throwaway hash checked for unknown emails
    pub fn stored_hash_format(&self) -> StoredHashFormat {
        match self.password_hash_format {
            PasswordHashFormat::Argon2 => StoredHashFormat::Argon2,
            PasswordHashFormat::Bcrypt => StoredHashFormat::Bcrypt {
                cost: self.bcrypt_cost,
            },
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_ms: 3000,
            lookup_timeout_ms: 5000,
        }
    }
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

/// Flat environment variables from earlier deployments and the keys they feed
const LEGACY_ENV: [(&str, &str); 4] = [
    ("SECRET_KEY", "auth.secret"),
    ("APP_NAME", "auth.issuer"),
    ("DATABASE_URL", "database.url"),
    ("PORT", "server.port"),
];

impl AppConfig {
    /// Load from `config/default`, `config/local`, `APP__*` variables, then legacy variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in LEGACY_ENV {
            builder = builder.set_override_option(key, lookup(var).filter(|v| !v.is_empty()))?;
        }

        builder.build()?.try_deserialize()
    }
}
