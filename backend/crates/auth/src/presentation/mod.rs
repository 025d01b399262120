//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the bearer token extractor.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use extract::{Authenticated, TokenGuard};
pub use handlers::AuthAppState;
pub use router::auth_router;
