//! In-Memory Repository Implementations
//!
//! Used by tests and database-less local runs. Ids count up from 1.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::{PostId, StoryId};
use tokio::sync::RwLock;

use crate::domain::entities::{NewPost, NewStory, Post, Story};
use crate::domain::repository::{PostRepository, StoryRepository};
use crate::error::SocialResult;

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPostStore {
    table: Arc<RwLock<Table<Post>>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostRepository for InMemoryPostStore {
    async fn insert(&self, post: NewPost) -> SocialResult<Post> {
        let mut table = self.table.write().await;
        let id = table.next_id();
        let post = Post {
            id: PostId::new(id),
            username: post.username,
            user_id: post.user_id,
            image_url: post.image_url,
            description: post.description,
            likes: post.likes,
        };
        table.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> SocialResult<Option<Post>> {
        Ok(self.table.read().await.rows.get(&id.get()).cloned())
    }

    async fn list(&self) -> SocialResult<Vec<Post>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, post: &Post) -> SocialResult<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&post.id.get()) {
            Some(stored) => {
                *stored = post.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: PostId) -> SocialResult<bool> {
        Ok(self.table.write().await.rows.remove(&id.get()).is_some())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStoryStore {
    table: Arc<RwLock<Table<Story>>>,
}

impl InMemoryStoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoryRepository for InMemoryStoryStore {
    async fn insert(&self, story: NewStory) -> SocialResult<Story> {
        let mut table = self.table.write().await;
        let id = table.next_id();
        let story = Story {
            id: StoryId::new(id),
            username: story.username,
            image_url: story.image_url,
        };
        table.rows.insert(id, story.clone());
        Ok(story)
    }

    async fn find_by_id(&self, id: StoryId) -> SocialResult<Option<Story>> {
        Ok(self.table.read().await.rows.get(&id.get()).cloned())
    }

    async fn list(&self) -> SocialResult<Vec<Story>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, story: &Story) -> SocialResult<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&story.id.get()) {
            Some(stored) => {
                *stored = story.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: StoryId) -> SocialResult<bool> {
        Ok(self.table.write().await.rows.remove(&id.get()).is_some())
    }
}
