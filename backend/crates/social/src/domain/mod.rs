//! Domain Layer
//!
//! Contains entities and repository traits.

pub mod entities;
pub mod repository;

// Re-exports
pub use entities::{NewPost, NewStory, Post, PostUpdate, Story, StoryUpdate};
pub use repository::{PostRepository, StoryRepository};
