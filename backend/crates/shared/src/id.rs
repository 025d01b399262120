//! Common ID Types
//!
//! Store-assigned integer identifiers, typed per entity so a post id can
//! never be passed where an account id is expected.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Typed record id wrapping the database's `BIGSERIAL` value.
///
/// ```
/// use kernel::id::{RecordId, markers};
/// type PostId = RecordId<markers::Post>;
///
/// let id = PostId::new(7);
/// assert_eq!(id.get(), 7);
/// ```
pub struct RecordId<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RecordId<T> {
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would put bounds on the marker type.
impl<T> Clone for RecordId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RecordId<T> {}

impl<T> PartialEq for RecordId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for RecordId<T> {}

impl<T> PartialOrd for RecordId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for RecordId<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> std::hash::Hash for RecordId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for RecordId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.value)
    }
}

impl<T> fmt::Display for RecordId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for RecordId<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<RecordId<T>> for i64 {
    fn from(id: RecordId<T>) -> Self {
        id.value
    }
}

impl<T> FromStr for RecordId<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self::new)
    }
}

impl<T> Serialize for RecordId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for RecordId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for the entities that own an id
pub mod markers {
    pub struct Account;
    pub struct Post;
    pub struct Story;
}

pub type AccountId = RecordId<markers::Account>;
pub type PostId = RecordId<markers::Post>;
pub type StoryId = RecordId<markers::Story>;
