//! Domain Entities
//!
//! Posts and stories plus the validated inputs that create and update them.

use kernel::id::{AccountId, PostId, StoryId};
use serde::Serialize;

use crate::error::{SocialError, SocialResult};

/// Column width of `image_url`
pub const IMAGE_URL_MAX_LENGTH: usize = 255;
/// Column width of `description`
pub const DESCRIPTION_MAX_LENGTH: usize = 100;
/// Column width of `username`
pub const USERNAME_MAX_LENGTH: usize = 50;

// ============================================================================
// Post
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub username: String,
    pub user_id: AccountId,
    pub image_url: String,
    pub description: String,
    pub likes: i32,
}

impl Post {
    /// Overwrite the fields present in `update`. Author fields never change.
    pub fn apply(&mut self, update: PostUpdate) {
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(likes) = update.likes {
            self.likes = likes;
        }
    }
}

/// Client input for a new post.
///
/// `user_id` is optional; the stored value always comes from the
/// author's account.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub username: String,
    pub user_id: Option<AccountId>,
    pub image_url: String,
    pub description: String,
    pub likes: i32,
}

impl PostDraft {
    pub fn into_new_post(self, user_id: AccountId) -> NewPost {
        NewPost {
            username: self.username,
            user_id,
            image_url: self.image_url,
            description: self.description,
            likes: self.likes,
        }
    }
}

/// A post about to be inserted
#[derive(Debug, Clone)]
pub struct NewPost {
    pub username: String,
    pub user_id: AccountId,
    pub image_url: String,
    pub description: String,
    pub likes: i32,
}

impl NewPost {
    pub fn validate(&self) -> SocialResult<()> {
        validate_username(&self.username)?;
        validate_image_url(&self.image_url)?;
        validate_description(&self.description)?;
        validate_likes(self.likes)
    }
}

/// Partial update; `None` leaves the stored value as it is
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub likes: Option<i32>,
}

impl PostUpdate {
    pub fn validate(&self) -> SocialResult<()> {
        if let Some(image_url) = &self.image_url {
            validate_image_url(image_url)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(likes) = self.likes {
            validate_likes(likes)?;
        }
        Ok(())
    }
}

// ============================================================================
// Story
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Story {
    pub id: StoryId,
    pub username: String,
    pub image_url: String,
}

impl Story {
    pub fn apply(&mut self, update: StoryUpdate) {
        self.image_url = update.image_url;
    }
}

#[derive(Debug, Clone)]
pub struct NewStory {
    pub username: String,
    pub image_url: String,
}

impl NewStory {
    pub fn validate(&self) -> SocialResult<()> {
        validate_username(&self.username)?;
        validate_image_url(&self.image_url)
    }
}

#[derive(Debug, Clone)]
pub struct StoryUpdate {
    pub image_url: String,
}

impl StoryUpdate {
    pub fn validate(&self) -> SocialResult<()> {
        validate_image_url(&self.image_url)
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_username(username: &str) -> SocialResult<()> {
    if username.trim().is_empty() {
        return Err(SocialError::Validation("username must not be empty".into()));
    }
    if username.chars().count() > USERNAME_MAX_LENGTH {
        return Err(SocialError::Validation(format!(
            "username must be at most {USERNAME_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_image_url(image_url: &str) -> SocialResult<()> {
    if image_url.trim().is_empty() {
        return Err(SocialError::Validation("image_url must not be empty".into()));
    }
    if image_url.chars().count() > IMAGE_URL_MAX_LENGTH {
        return Err(SocialError::Validation(format!(
            "image_url must be at most {IMAGE_URL_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> SocialResult<()> {
    if description.chars().count() > DESCRIPTION_MAX_LENGTH {
        return Err(SocialError::Validation(format!(
            "description must be at most {DESCRIPTION_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_likes(likes: i32) -> SocialResult<()> {
    if likes < 0 {
        return Err(SocialError::Validation("likes must not be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post() -> NewPost {
        NewPost {
            username: "alice".into(),
            user_id: AccountId::new(1),
            image_url: "https://img.example/1.png".into(),
            description: "sunset".into(),
            likes: 0,
        }
    }

    #[test]
    fn test_valid_post() {
        assert!(new_post().validate().is_ok());
    }

    #[test]
    fn test_post_field_limits() {
        let post = NewPost {
            image_url: String::new(),
            ..new_post()
        };
        assert!(matches!(post.validate(), Err(SocialError::Validation(_))));

        let post = NewPost {
            image_url: "x".repeat(IMAGE_URL_MAX_LENGTH + 1),
            ..new_post()
        };
        assert!(post.validate().is_err());

        let post = NewPost {
            description: "d".repeat(DESCRIPTION_MAX_LENGTH),
            ..new_post()
        };
        assert!(post.validate().is_ok());

        let post = NewPost {
            description: "d".repeat(DESCRIPTION_MAX_LENGTH + 1),
            ..new_post()
        };
        assert!(post.validate().is_err());

        let post = NewPost {
            likes: -1,
            ..new_post()
        };
        assert!(post.validate().is_err());

        let post = NewPost {
            username: " ".into(),
            ..new_post()
        };
        assert!(post.validate().is_err());
    }

    #[test]
    fn test_post_apply_keeps_author() {
        let mut post = Post {
            id: PostId::new(3),
            username: "alice".into(),
            user_id: AccountId::new(1),
            image_url: "a".into(),
            description: "old".into(),
            likes: 1,
        };
        post.apply(PostUpdate {
            image_url: Some("b".into()),
            description: Some("new".into()),
            likes: Some(5),
        });

        assert_eq!(post.username, "alice");
        assert_eq!(post.user_id, AccountId::new(1));
        assert_eq!(post.image_url, "b");
        assert_eq!(post.description, "new");
        assert_eq!(post.likes, 5);
    }

    #[test]
    fn test_post_apply_partial() {
        let mut post = Post {
            id: PostId::new(3),
            username: "alice".into(),
            user_id: AccountId::new(1),
            image_url: "a".into(),
            description: "keep me".into(),
            likes: 42,
        };
        post.apply(PostUpdate {
            likes: Some(43),
            ..PostUpdate::default()
        });

        assert_eq!(post.image_url, "a");
        assert_eq!(post.description, "keep me");
        assert_eq!(post.likes, 43);
    }

    #[test]
    fn test_post_update_validates_present_fields_only() {
        assert!(PostUpdate::default().validate().is_ok());
        assert!(
            PostUpdate {
                likes: Some(-1),
                ..PostUpdate::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            PostUpdate {
                image_url: Some(" ".into()),
                ..PostUpdate::default()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_story_validation() {
        let story = NewStory {
            username: "alice".into(),
            image_url: "https://img.example/s.png".into(),
        };
        assert!(story.validate().is_ok());

        assert!(
            StoryUpdate {
                image_url: "".into()
            }
            .validate()
            .is_err()
        );
    }
}
