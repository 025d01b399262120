//! Story Service

use std::sync::Arc;

use kernel::id::StoryId;

use crate::domain::entities::{NewStory, Story, StoryUpdate};
use crate::domain::repository::StoryRepository;
use crate::error::{SocialError, SocialResult};

pub struct StoryService<R> {
    store: Arc<R>,
}

impl<R> StoryService<R>
where
    R: StoryRepository,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    pub async fn create(&self, actor: &str, story: NewStory) -> SocialResult<Story> {
        story.validate()?;
        if story.username != actor {
            return Err(SocialError::NotOwner);
        }

        let story = self.store.insert(story).await?;
        tracing::info!(story_id = %story.id, username = %story.username, "Story created");

        Ok(story)
    }

    pub async fn list(&self) -> SocialResult<Vec<Story>> {
        self.store.list().await
    }

    pub async fn get(&self, id: StoryId) -> SocialResult<Story> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(SocialError::StoryNotFound)
    }

    pub async fn update(
        &self,
        actor: &str,
        id: StoryId,
        update: StoryUpdate,
    ) -> SocialResult<Story> {
        let mut story = self.get(id).await?;
        if story.username != actor {
            return Err(SocialError::NotOwner);
        }

        update.validate()?;
        story.apply(update);

        if !self.store.update(&story).await? {
            return Err(SocialError::StoryNotFound);
        }

        Ok(story)
    }

    pub async fn delete(&self, actor: &str, id: StoryId) -> SocialResult<()> {
        let story = self.get(id).await?;
        if story.username != actor {
            return Err(SocialError::NotOwner);
        }

        if !self.store.delete(id).await? {
            return Err(SocialError::StoryNotFound);
        }
        tracing::info!(story_id = %id, "Story deleted");

        Ok(())
    }
}
