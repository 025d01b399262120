//! Bearer Tokens
//!
//! Compact JWS tokens (`header.payload.signature`, base64url) signed with an
//! HMAC-SHA2 key. The payload names the subject username plus issue and
//! expiry times in Unix seconds.
//!
//! Expiry is checked here against the injected [`Clock`] instead of inside
//! `jsonwebtoken`, which reads the system time and applies leeway.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use platform::clock::Clock;
use serde::{Deserialize, Serialize};

use crate::application::config::{AuthConfig, is_symmetric};
use crate::error::{AuthError, AuthResult};

/// Claims carried by a valid token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username of the account the token was issued for
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds); invalid from this instant on
    pub exp: i64,
}

impl TokenClaims {
    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Payload as it arrives from the wire, before the subject is checked
#[derive(Deserialize)]
struct WireClaims {
    sub: Option<String>,
    #[serde(default)]
    iat: i64,
    exp: i64,
}

/// A freshly issued token and the claims it encodes
#[derive(Clone)]
pub struct AccessToken {
    token: String,
    claims: TokenClaims,
}

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn into_string(self) -> String {
        self.token
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("claims", &self.claims)
            .finish()
    }
}

/// Anything that can turn a presented bearer string into verified claims.
///
/// Route extractors hold this as a trait object so other crates can protect
/// their routes without depending on the auth service's type parameters.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> AuthResult<TokenClaims>;
}

/// Signs and verifies tokens with a single symmetric key
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> AuthResult<Self> {
        if config.token_secret.is_empty() {
            return Err(AuthError::Configuration(
                "token secret must not be empty".to_string(),
            ));
        }
        if !is_symmetric(config.token_algorithm) {
            return Err(AuthError::Configuration(format!(
                "unsupported token algorithm {:?}; expected HS256, HS384 or HS512",
                config.token_algorithm
            )));
        }

        let mut validation = Validation::new(config.token_algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            algorithm: config.token_algorithm,
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            validation,
            clock,
        })
    }

    /// Sign a token for `subject` valid for `ttl` from now.
    pub fn encode(&self, subject: &str, ttl: Duration) -> AuthResult<AccessToken> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal("token lifetime overflows".to_string()))?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("failed to sign token: {e}")))?;

        Ok(AccessToken { token, claims })
    }

    /// Check signature, algorithm, expiry and subject.
    ///
    /// Every failure is reported as [`AuthError::InvalidToken`].
    pub fn decode(&self, token: &str) -> AuthResult<TokenClaims> {
        let data = jsonwebtoken::decode::<WireClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })?;
        let claims = data.claims;

        if self.clock.now().timestamp() >= claims.exp {
            tracing::debug!(exp = claims.exp, "Token expired");
            return Err(AuthError::InvalidToken);
        }

        let sub = match claims.sub {
            Some(sub) if !sub.is_empty() => sub,
            _ => {
                tracing::debug!("Token has no subject");
                return Err(AuthError::InvalidToken);
            }
        };

        Ok(TokenClaims {
            sub,
            iat: claims.iat,
            exp: claims.exp,
        })
    }
}

impl TokenVerifier for TokenCodec {
    fn verify(&self, token: &str) -> AuthResult<TokenClaims> {
        self.decode(token)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
