//! Username Value Object
//!
//! The unique, human-chosen login identifier. Input is trimmed once at the
//! boundary; after that, comparison is exact (no case folding).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Maximum username length in characters (matches the `VARCHAR(50)` column)
pub const USERNAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("username must not be empty")]
    Empty,

    #[error("username must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("username must not contain whitespace")]
    ContainsWhitespace,

    #[error("username must not contain control characters")]
    ContainsControl,
}

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Trim and validate a raw username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UsernameError> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        let actual = trimmed.chars().count();
        if actual > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: USERNAME_MAX_LENGTH,
                actual,
            });
        }

        // Control check first: '\t' and '\n' are both.
        if trimmed.chars().any(char::is_control) {
            return Err(UsernameError::ContainsControl);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(UsernameError::ContainsWhitespace);
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
