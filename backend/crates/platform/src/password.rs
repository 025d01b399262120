//! Password Hashing and Verification
//!
//! - [`ClearTextPassword`]: user input, NFKC-normalized, zeroized on drop
//! - [`PasswordPolicy`]: configurable strength rules applied when a password is set
//! - [`PasswordHasher`] / [`Argon2Hasher`]: salted Argon2id digests in PHC format
//! - [`HashedPassword`]: the digest, safe to store, redacted in logs

use std::fmt;

use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum length under [`PasswordPolicy::strict`] (NIST SP 800-63B)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hard upper bound, enforced for every password
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParams(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization.
///
/// Not `Clone`; `Debug` is redacted.
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("p1".to_string()).unwrap();
/// assert_eq!(password.char_count(), 2);
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize (NFKC) and apply the rules every password must meet:
    /// not blank, at most [`MAX_PASSWORD_LENGTH`] code points, no control
    /// characters other than space, tab and newline.
    ///
    /// Strength rules live in [`PasswordPolicy`] so that login can accept
    /// passwords created under an older, weaker policy.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        let password = Self(normalized);

        if password.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = password.char_count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if password
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(password)
    }

    /// Length in Unicode code points
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Password Policy
// ============================================================================

/// Strength rules applied when a password is chosen (registration, change).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub reject_common_patterns: bool,
}

impl Default for PasswordPolicy {
    /// Any non-blank password is accepted.
    fn default() -> Self {
        Self {
            min_length: 1,
            reject_common_patterns: false,
        }
    }
}

impl PasswordPolicy {
    /// NIST SP 800-63B style: 8+ characters, no dictionary/sequence passwords
    pub fn strict() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            reject_common_patterns: true,
        }
    }

    pub fn check(&self, password: &ClearTextPassword) -> Result<(), PasswordPolicyError> {
        let char_count = password.char_count();
        if char_count < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min: self.min_length,
                actual: char_count,
            });
        }

        if self.reject_common_patterns && is_common_pattern(password.as_str()) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(())
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Password digest in PHC string format
/// (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`).
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Load a digest read back from storage
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// One-way password digest computation and verification
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError>;

    /// `false` for a wrong password as well as for an unparseable digest.
    fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool;
}

/// Argon2id hasher with a random 128-bit salt per digest and an optional
/// application-wide pepper.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
    pepper: Option<Vec<u8>>,
}

impl Argon2Hasher {
    /// OWASP recommended parameters: m=19456 (19 MiB), t=2, p=1
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
            pepper,
        }
    }

    pub fn with_params(
        m_cost: u32,
        t_cost: u32,
        p_cost: u32,
        pepper: Option<Vec<u8>>,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            pepper,
        })
    }

    /// Minimal-cost parameters for tests and local tooling only.
    pub fn low_cost() -> Self {
        Self {
            argon2: Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(Params::MIN_M_COST, 1, 1, None).unwrap_or_default(),
            ),
            pepper: None,
        }
    }

    fn peppered(&self, password: &ClearTextPassword) -> Vec<u8> {
        let mut bytes = password.as_bytes().to_vec();
        if let Some(pepper) = &self.pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let mut bytes = self.peppered(password);
        let salt = SaltString::generate(&mut OsRng);

        let result = self
            .argon2
            .hash_password(&bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        bytes.zeroize();
        result
    }

    fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return false;
        };

        // Parameters come from the PHC string, so older digests still verify.
        let mut bytes = self.peppered(password);
        let valid = self.argon2.verify_password(&bytes, &parsed).is_ok();
        bytes.zeroize();
        valid
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // "aaaaaaaa"
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if lower.chars().count() >= 3 && chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];
    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "abcdefgh",
        "letmein",
        "welcome",
        "admin123",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "baseball",
        "trustno1",
    ];

    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// "12345678", "98765432", wrapping through 0
fn is_sequential_numbers(s: &str) -> bool {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 4 {
        return false;
    }

    let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);
    ascending || descending
}

// ============================================================================
// Tests
// ============================================================================
