//! Bearer Credentials
//!
//! Parsing of `Authorization: Bearer <token>` (RFC 6750) and the matching
//! `WWW-Authenticate` challenge.

use axum::http::{HeaderMap, HeaderValue, header};

/// Authentication scheme name
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from the `Authorization` header.
///
/// The scheme is matched case-insensitively. Returns `None` when the header
/// is absent, not valid UTF-8, uses another scheme, or carries an empty token.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Value for the `WWW-Authenticate` header sent with 401 responses
pub fn challenge() -> HeaderValue {
    HeaderValue::from_static(BEARER_SCHEME)
}
