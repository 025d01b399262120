//! PostgreSQL Repository Implementations

use kernel::id::{AccountId, PostId, StoryId};
use sqlx::PgPool;

use crate::domain::entities::{NewPost, NewStory, Post, Story};
use crate::domain::repository::{PostRepository, StoryRepository};
use crate::error::SocialResult;

// ============================================================================
// Posts
// ============================================================================

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PostRepository for PgPostStore {
    async fn insert(&self, post: NewPost) -> SocialResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (username, user_id, image_url, description, likes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, user_id, image_url, description, likes
            "#,
        )
        .bind(&post.username)
        .bind(post.user_id.get())
        .bind(&post.image_url)
        .bind(&post.description)
        .bind(post.likes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: PostId) -> SocialResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, username, user_id, image_url, description, likes
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self) -> SocialResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, username, user_id, image_url, description, likes
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, post: &Post) -> SocialResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE posts
            SET image_url = $2, description = $3, likes = $4
            WHERE id = $1
            "#,
        )
        .bind(post.id.get())
        .bind(&post.image_url)
        .bind(&post.description)
        .bind(post.likes)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, id: PostId) -> SocialResult<bool> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Stories
// ============================================================================

#[derive(Clone)]
pub struct PgStoryStore {
    pool: PgPool,
}

impl PgStoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl StoryRepository for PgStoryStore {
    async fn insert(&self, story: NewStory) -> SocialResult<Story> {
        let row = sqlx::query_as::<_, StoryRow>(
            r#"
            INSERT INTO stories (username, image_url)
            VALUES ($1, $2)
            RETURNING id, username, image_url
            "#,
        )
        .bind(&story.username)
        .bind(&story.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: StoryId) -> SocialResult<Option<Story>> {
        let row = sqlx::query_as::<_, StoryRow>(
            "SELECT id, username, image_url FROM stories WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self) -> SocialResult<Vec<Story>> {
        let rows = sqlx::query_as::<_, StoryRow>(
            "SELECT id, username, image_url FROM stories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, story: &Story) -> SocialResult<bool> {
        let updated = sqlx::query("UPDATE stories SET image_url = $2 WHERE id = $1")
            .bind(story.id.get())
            .bind(&story.image_url)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, id: StoryId) -> SocialResult<bool> {
        let deleted = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    username: String,
    user_id: i64,
    image_url: String,
    description: String,
    likes: i32,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId::new(row.id),
            username: row.username,
            user_id: AccountId::new(row.user_id),
            image_url: row.image_url,
            description: row.description,
            likes: row.likes,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StoryRow {
    id: i64,
    username: String,
    image_url: String,
}

impl From<StoryRow> for Story {
    fn from(row: StoryRow) -> Self {
        Story {
            id: StoryId::new(row.id),
            username: row.username,
            image_url: row.image_url,
        }
    }
}
