//! Infrastructure Layer
//!
//! Database implementations of the repository traits.

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryPostStore, InMemoryStoryStore};
pub use postgres::{PgPostStore, PgStoryStore};
