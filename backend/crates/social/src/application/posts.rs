//! Post Service

use std::sync::Arc;

use auth::domain::repository::AccountRepository;
use auth::domain::value_object::username::Username;
use kernel::id::{AccountId, PostId};

use crate::domain::entities::{Post, PostDraft, PostUpdate};
use crate::domain::repository::PostRepository;
use crate::error::{SocialError, SocialResult};

pub struct PostService<R, A> {
    store: Arc<R>,
    accounts: Arc<A>,
}

impl<R, A> PostService<R, A>
where
    R: PostRepository,
    A: AccountRepository,
{
    /// `accounts` resolves the author's id when a post is created.
    pub fn new(store: Arc<R>, accounts: Arc<A>) -> Self {
        Self { store, accounts }
    }

    /// Create a post authored by `actor`.
    ///
    /// A `user_id` in the draft must be the actor's own account id.
    pub async fn create(&self, actor: &str, draft: PostDraft) -> SocialResult<Post> {
        if draft.username != actor {
            return Err(SocialError::NotOwner);
        }

        let author = self.author_id(actor).await?;
        if draft.user_id.is_some_and(|claimed| claimed != author) {
            return Err(SocialError::NotOwner);
        }

        let post = draft.into_new_post(author);
        post.validate()?;

        let post = self.store.insert(post).await?;
        tracing::info!(post_id = %post.id, username = %post.username, "Post created");

        Ok(post)
    }

    pub async fn list(&self) -> SocialResult<Vec<Post>> {
        self.store.list().await
    }

    pub async fn get(&self, id: PostId) -> SocialResult<Post> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(SocialError::PostNotFound)
    }

    pub async fn update(&self, actor: &str, id: PostId, update: PostUpdate) -> SocialResult<Post> {
        let mut post = self.owned(actor, id).await?;

        update.validate()?;
        post.apply(update);

        if !self.store.update(&post).await? {
            return Err(SocialError::PostNotFound);
        }

        Ok(post)
    }

    pub async fn delete(&self, actor: &str, id: PostId) -> SocialResult<()> {
        self.owned(actor, id).await?;

        if !self.store.delete(id).await? {
            return Err(SocialError::PostNotFound);
        }
        tracing::info!(post_id = %id, "Post deleted");

        Ok(())
    }

    async fn owned(&self, actor: &str, id: PostId) -> SocialResult<Post> {
        let post = self.get(id).await?;
        if post.username != actor {
            return Err(SocialError::NotOwner);
        }
        Ok(post)
    }

    /// Account id behind a token subject; an account deleted since the
    /// token was issued cannot author posts.
    async fn author_id(&self, actor: &str) -> SocialResult<AccountId> {
        let username = Username::new(actor).map_err(|_| SocialError::NotOwner)?;
        self.accounts
            .find_by_username(&username)
            .await?
            .map(|account| account.id)
            .ok_or(SocialError::NotOwner)
    }
}
