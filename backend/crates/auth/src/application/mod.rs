//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod service;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use service::AuthService;
pub use token::{AccessToken, TokenClaims, TokenCodec, TokenVerifier};
