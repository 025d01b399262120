//! Social Backend Module
//!
//! Posts and stories for the timeline.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, input validation, repository traits
//! - `application/` - Post and story services
//! - `infra/` - Postgres and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Reads are public. Writes need a bearer token (see `auth::Authenticated`)
//! whose subject matches the record's `username`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{PostService, StoryService};
pub use error::{SocialError, SocialResult};
pub use infra::memory::{InMemoryPostStore, InMemoryStoryStore};
pub use infra::postgres::{PgPostStore, PgStoryStore};
pub use presentation::router::social_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
