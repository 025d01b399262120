//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` is
//! loaded) and immutable afterwards.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::{Algorithm, PasswordPolicy, is_symmetric};
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose;

/// Minimum decoded length of `AUTH_TOKEN_SECRET`
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: u64 = 30;

pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<HeaderValue>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url =
            get("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8000")?;

        let frontend_origins = parse_origins(
            &get("FRONTEND_ORIGINS").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            auth: auth_config(&get)?,
        })
    }
}

fn auth_config(get: &impl Fn(&str) -> Option<String>) -> anyhow::Result<AuthConfig> {
    let mut config = match get("AUTH_TOKEN_SECRET") {
        Some(encoded) => AuthConfig::with_secret(decode_secret(&encoded)?),
        None if cfg!(debug_assertions) => {
            tracing::warn!("AUTH_TOKEN_SECRET not set; using a random secret for this run");
            AuthConfig::with_random_secret()
        }
        None => bail!("AUTH_TOKEN_SECRET must be set in production"),
    };

    if let Some(name) = get("AUTH_TOKEN_ALGORITHM") {
        let algorithm = Algorithm::from_str(name.trim())
            .with_context(|| format!("unknown AUTH_TOKEN_ALGORITHM {name:?}"))?;
        if !is_symmetric(algorithm) {
            bail!("AUTH_TOKEN_ALGORITHM must be HS256, HS384 or HS512");
        }
        config.token_algorithm = algorithm;
    }

    let ttl_minutes = match get("AUTH_ACCESS_TOKEN_TTL_MINUTES") {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .context("AUTH_ACCESS_TOKEN_TTL_MINUTES must be a whole number of minutes")?,
        None => DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
    };
    if ttl_minutes == 0 {
        bail!("AUTH_ACCESS_TOKEN_TTL_MINUTES must be positive");
    }
    config.access_token_ttl = Duration::from_secs(ttl_minutes * 60);

    config.password_pepper = get("AUTH_PASSWORD_PEPPER")
        .filter(|pepper| !pepper.is_empty())
        .map(String::into_bytes);

    if get("AUTH_STRICT_PASSWORD_POLICY").is_some_and(|raw| parse_flag(&raw)) {
        config.password_policy = PasswordPolicy::strict();
    }

    Ok(config)
}

fn decode_secret(encoded: &str) -> anyhow::Result<Vec<u8>> {
    let secret = general_purpose::STANDARD
        .decode(encoded.trim())
        .context("AUTH_TOKEN_SECRET must be base64")?;
    if secret.len() < MIN_TOKEN_SECRET_LEN {
        bail!("AUTH_TOKEN_SECRET must decode to at least {MIN_TOKEN_SECRET_LEN} bytes");
    }
    Ok(secret)
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn secret_b64() -> String {
        general_purpose::STANDARD.encode([7u8; MIN_TOKEN_SECRET_LEN])
    }

    #[test]
    fn test_defaults() {
        let secret = secret_b64();
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/timeline"),
            ("AUTH_TOKEN_SECRET", secret.as_str()),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.frontend_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.auth.token_secret, vec![7u8; MIN_TOKEN_SECRET_LEN]);
        assert_eq!(config.auth.token_algorithm, Algorithm::HS256);
        assert_eq!(config.auth.access_token_ttl, Duration::from_secs(1800));
        assert_eq!(config.auth.password_policy, PasswordPolicy::default());
        assert!(config.auth.password_pepper.is_none());
    }

    #[test]
    fn test_overrides() {
        let secret = secret_b64();
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/timeline"),
            ("AUTH_TOKEN_SECRET", secret.as_str()),
            ("AUTH_TOKEN_ALGORITHM", "HS512"),
            ("AUTH_ACCESS_TOKEN_TTL_MINUTES", "5"),
            ("AUTH_PASSWORD_PEPPER", "pepper"),
            ("AUTH_STRICT_PASSWORD_POLICY", "true"),
            ("FRONTEND_ORIGINS", "http://a.test, http://b.test,"),
            ("BIND_ADDR", "127.0.0.1:9000"),
        ]))
        .unwrap();

        assert_eq!(config.auth.token_algorithm, Algorithm::HS512);
        assert_eq!(config.auth.access_token_ttl, Duration::from_secs(300));
        assert_eq!(config.auth.pepper(), Some(&b"pepper"[..]));
        assert_eq!(config.auth.password_policy, PasswordPolicy::strict());
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn test_missing_database_url() {
        let secret = secret_b64();
        let result = ServerConfig::from_lookup(lookup(&[("AUTH_TOKEN_SECRET", secret.as_str())]));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_secret() {
        let short = general_purpose::STANDARD.encode([1u8; 8]);
        for secret in ["not base64!!", short.as_str()] {
            let result = ServerConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://localhost/timeline"),
                ("AUTH_TOKEN_SECRET", secret),
            ]));
            assert!(result.is_err(), "{secret}");
        }
    }

    #[test]
    fn test_asymmetric_algorithm_rejected() {
        let secret = secret_b64();
        let result = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/timeline"),
            ("AUTH_TOKEN_SECRET", secret.as_str()),
            ("AUTH_TOKEN_ALGORITHM", "RS256"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
