//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

pub use jsonwebtoken::Algorithm;
pub use platform::password::PasswordPolicy;

/// Length of generated token secrets in bytes
pub const GENERATED_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric key for signing bearer tokens
    pub token_secret: Vec<u8>,
    /// Signing algorithm; only the HMAC family is accepted
    pub token_algorithm: Algorithm,
    /// Lifetime of tokens issued by the login flow (30 minutes)
    pub access_token_ttl: Duration,
    /// Lifetime when `issue_token` is called without one (15 minutes)
    pub default_token_ttl: Duration,
    /// Rules a new password must satisfy
    pub password_policy: PasswordPolicy,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_algorithm: Algorithm::HS256,
            access_token_ttl: Duration::from_secs(30 * 60),
            default_token_ttl: Duration::from_secs(15 * 60),
            password_policy: PasswordPolicy::default(),
            password_pepper: None,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_algorithm", &self.token_algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("default_token_ttl", &self.default_token_ttl)
            .field("password_policy", &self.password_policy)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AuthConfig {
    /// Create config with the given signing secret
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create config with a random signing secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; GENERATED_SECRET_LEN];
        rand::rng().fill_bytes(&mut secret);
        Self::with_secret(secret)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

/// Whether `algorithm` is one of the HMAC-SHA2 variants
pub fn is_symmetric(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}
