//! API DTOs (Data Transfer Objects)
//!
//! Responses serialize the domain entities directly.

use kernel::id::AccountId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewStory, PostDraft, PostUpdate, StoryUpdate};

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub username: String,
    #[serde(default)]
    pub user_id: Option<AccountId>,
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub likes: i32,
}

impl From<CreatePostRequest> for PostDraft {
    fn from(req: CreatePostRequest) -> Self {
        PostDraft {
            username: req.username,
            user_id: req.user_id,
            image_url: req.image_url,
            description: req.description,
            likes: req.likes,
        }
    }
}

/// Every field is optional; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePostRequest {
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub likes: Option<i32>,
}

impl From<UpdatePostRequest> for PostUpdate {
    fn from(req: UpdatePostRequest) -> Self {
        PostUpdate {
            image_url: req.image_url,
            description: req.description,
            likes: req.likes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStoryRequest {
    pub username: String,
    pub image_url: String,
}

impl From<CreateStoryRequest> for NewStory {
    fn from(req: CreateStoryRequest) -> Self {
        NewStory {
            username: req.username,
            image_url: req.image_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStoryRequest {
    pub image_url: String,
}

impl From<UpdateStoryRequest> for StoryUpdate {
    fn from(req: UpdateStoryRequest) -> Self {
        StoryUpdate {
            image_url: req.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub detail: &'static str,
}
