//! HTTP Handlers

use std::sync::Arc;

use auth::domain::repository::AccountRepository;
use auth::{Authenticated, TokenGuard};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use kernel::id::{PostId, StoryId};

use crate::application::{PostService, StoryService};
use crate::domain::entities::{Post, Story};
use crate::domain::repository::{PostRepository, StoryRepository};
use crate::error::SocialResult;
use crate::presentation::dto::{
    CreatePostRequest, CreateStoryRequest, DetailResponse, UpdatePostRequest, UpdateStoryRequest,
};

/// Shared state for social handlers
pub struct SocialAppState<P, S, A> {
    pub posts: Arc<PostService<P, A>>,
    pub stories: Arc<StoryService<S>>,
    pub tokens: TokenGuard,
}

impl<P, S, A> Clone for SocialAppState<P, S, A> {
    fn clone(&self) -> Self {
        Self {
            posts: self.posts.clone(),
            stories: self.stories.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<P, S, A> FromRef<SocialAppState<P, S, A>> for TokenGuard {
    fn from_ref(state: &SocialAppState<P, S, A>) -> Self {
        state.tokens.clone()
    }
}

// ============================================================================
// Posts
// ============================================================================

/// POST /posts/
pub async fn create_post<P, S, A>(
    State(state): State<SocialAppState<P, S, A>>,
    auth: Authenticated,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> SocialResult<(StatusCode, Json<Post>)>
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let post = state.posts.create(auth.username(), req.into()).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts/
pub async fn list_posts<P, S, A>(
    State(state): State<SocialAppState<P, S, A>>,
) -> SocialResult<Json<Vec<Post>>>
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    Ok(Json(state.posts.list().await?))
}

/// GET /posts/{post_id}
pub async fn get_post<P, S, A>(
    State(state): State<SocialAppState<P, S, A>>,
    path: Result<Path<PostId>, PathRejection>,
) -> SocialResult<Json<Post>>
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    let Path(id) = path?;
    Ok(Json(state.posts.get(id).await?))
}

/// PUT /posts/{post_id}
pub async fn update_post<P, S, A>(
    State(state): State<SocialAppState<P, S, A>>,
    auth: Authenticated,
    path: Result<Path<PostId>, PathRejection>,
    body: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> SocialResult<Json<Post>>
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    let Path(id) = path?;
    let Json(req) = body?;
    let post = state.posts.update(auth.username(), id, req.into()).await?;
    Ok(Json(post))
}

/// DELETE /posts/{post_id}
pub async fn delete_post<P, S, A>(
    State(state): State<SocialAppState<P, S, A>>,
    auth: Authenticated,
    path: Result<Path<PostId>, PathRejection>,
) -> SocialResult<Json<DetailResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    let Path(id) = path?;
    state.posts.delete(auth.username(), id).await?;
    Ok(Json(DetailResponse {
        detail: "Post deleted successfully",
    }))
}

// ============================================================================
// Stories
// ============================================================================

/// POST /stories/
pub async fn create_story<P, S, A>(
    State(state): State<SocialAppState<P, S, A>>,
    auth: Authenticated,
    body: Result<Json<CreateStoryRequest>, JsonRejection>,
) -> SocialResult<(StatusCode, Json<Story>)>
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let story = state.stories.create(auth.username(), req.into()).await?;
    Ok((StatusCode::CREATED, Json(story)))
}

/// GET /stories/
pub async fn list_stories<P, S, A>(
    State(state): State<SocialAppState<P, S, A>>,
) -> SocialResult<Json<Vec<Story>>>
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    Ok(Json(state.stories.list().await?))
}

/// GET /stories/{story_id}
pub async fn get_story<P, S, A>(
    State(state): State<SocialAppState<P, S, A>>,
    path: Result<Path<StoryId>, PathRejection>,
) -> SocialResult<Json<Story>>
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    let Path(id) = path?;
    Ok(Json(state.stories.get(id).await?))
}

/// PUT /stories/{story_id}
pub async fn update_story<P, S, A>(
    State(state): State<SocialAppState<P, S, A>>,
    auth: Authenticated,
    path: Result<Path<StoryId>, PathRejection>,
    body: Result<Json<UpdateStoryRequest>, JsonRejection>,
) -> SocialResult<Json<Story>>
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    let Path(id) = path?;
    let Json(req) = body?;
    let story = state
        .stories
        .update(auth.username(), id, req.into())
        .await?;
    Ok(Json(story))
}

/// DELETE /stories/{story_id}
pub async fn delete_story<P, S, A>(
    State(state): State<SocialAppState<P, S, A>>,
    auth: Authenticated,
    path: Result<Path<StoryId>, PathRejection>,
) -> SocialResult<Json<DetailResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    let Path(id) = path?;
    state.stories.delete(auth.username(), id).await?;
    Ok(Json(DetailResponse {
        detail: "Story deleted successfully",
    }))
}
