//! Social Router

use std::sync::Arc;

use auth::TokenGuard;
use auth::domain::repository::AccountRepository;
use axum::{Router, routing::get};

use crate::application::{PostService, StoryService};
use crate::domain::repository::{PostRepository, StoryRepository};
use crate::presentation::handlers::{self, SocialAppState};

/// Create the posts/stories router.
///
/// `tokens` verifies bearer tokens on write routes.
pub fn social_router<P, S, A>(
    posts: Arc<PostService<P, A>>,
    stories: Arc<StoryService<S>>,
    tokens: TokenGuard,
) -> Router
where
    P: PostRepository + Send + Sync + 'static,
    S: StoryRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    let state = SocialAppState {
        posts,
        stories,
        tokens,
    };

    Router::new()
        .route(
            "/posts/",
            get(handlers::list_posts::<P, S, A>).post(handlers::create_post::<P, S, A>),
        )
        .route(
            "/posts/{post_id}",
            get(handlers::get_post::<P, S, A>)
                .put(handlers::update_post::<P, S, A>)
                .delete(handlers::delete_post::<P, S, A>),
        )
        .route(
            "/stories/",
            get(handlers::list_stories::<P, S, A>).post(handlers::create_story::<P, S, A>),
        )
        .route(
            "/stories/{story_id}",
            get(handlers::get_story::<P, S, A>)
                .put(handlers::update_story::<P, S, A>)
                .delete(handlers::delete_story::<P, S, A>),
        )
        .with_state(state)
}
