//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{PostId, StoryId};

use crate::domain::entities::{NewPost, NewStory, Post, Story};
use crate::error::SocialResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Insert a post; the store assigns the id
    async fn insert(&self, post: NewPost) -> SocialResult<Post>;

    async fn find_by_id(&self, id: PostId) -> SocialResult<Option<Post>>;

    /// All posts ordered by id
    async fn list(&self) -> SocialResult<Vec<Post>>;

    /// Persist the mutable fields. Returns `false` if the post is gone.
    async fn update(&self, post: &Post) -> SocialResult<bool>;

    /// Returns `false` if nothing was deleted
    async fn delete(&self, id: PostId) -> SocialResult<bool>;
}

/// Story repository trait
#[trait_variant::make(StoryRepository: Send)]
pub trait LocalStoryRepository {
    /// Insert a story; the store assigns the id
    async fn insert(&self, story: NewStory) -> SocialResult<Story>;

    async fn find_by_id(&self, id: StoryId) -> SocialResult<Option<Story>>;

    /// All stories ordered by id
    async fn list(&self) -> SocialResult<Vec<Story>>;

    /// Persist the mutable fields. Returns `false` if the story is gone.
    async fn update(&self, story: &Story) -> SocialResult<bool>;

    /// Returns `false` if nothing was deleted
    async fn delete(&self, id: StoryId) -> SocialResult<bool>;
}
