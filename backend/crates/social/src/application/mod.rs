//! Application Layer
//!
//! Post and story services.

pub mod posts;
pub mod stories;

// Re-exports
pub use posts::PostService;
pub use stories::StoryService;
