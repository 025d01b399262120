//! Service and HTTP tests for the social crate

use std::sync::Arc;

use auth::{AuthConfig, AuthService, InMemoryAccountStore, TokenGuard};
use kernel::id::AccountId;
use platform::password::Argon2Hasher;

use crate::application::{PostService, StoryService};
use crate::domain::entities::{NewStory, PostDraft, PostUpdate, StoryUpdate};
use crate::infra::memory::{InMemoryPostStore, InMemoryStoryStore};

type TestAuth = AuthService<InMemoryAccountStore, Argon2Hasher>;
type TestPosts = PostService<InMemoryPostStore, InMemoryAccountStore>;

/// Auth service and the account store it writes to
fn auth_service(secret: &[u8]) -> (Arc<TestAuth>, Arc<InMemoryAccountStore>) {
    let accounts = Arc::new(InMemoryAccountStore::new());
    let service = AuthService::new(
        accounts.clone(),
        Argon2Hasher::low_cost(),
        Arc::new(AuthConfig::with_secret(secret.to_vec())),
    )
    .unwrap();
    (Arc::new(service), accounts)
}

/// Register `username` and return its account id
async fn register(auth: &TestAuth, username: &str) -> AccountId {
    auth.register(username, "pw").await.unwrap().id
}

fn bearer_for(auth: &TestAuth, username: &str) -> String {
    let token = auth.issue_token(username, None).unwrap();
    format!("Bearer {}", token.as_str())
}

fn post_draft(username: &str) -> PostDraft {
    PostDraft {
        username: username.to_string(),
        user_id: None,
        image_url: "https://img.example/p.png".to_string(),
        description: "first light".to_string(),
        likes: 0,
    }
}

fn new_story(username: &str) -> NewStory {
    NewStory {
        username: username.to_string(),
        image_url: "https://img.example/s.png".to_string(),
    }
}

mod post_service_tests {
    use super::*;
    use crate::error::SocialError;
    use kernel::id::PostId;

    /// Post service with `alice` and `bob` registered
    async fn service() -> (TestPosts, AccountId) {
        let (auth, accounts) = auth_service(b"post-service-secret");
        let alice = register(&auth, "alice").await;
        register(&auth, "bob").await;
        let posts = PostService::new(Arc::new(InMemoryPostStore::new()), accounts);
        (posts, alice)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (posts, alice) = service().await;

        let created = posts.create("alice", post_draft("alice")).await.unwrap();
        assert_eq!(created.id, PostId::new(1));
        assert_eq!(created.user_id, alice);

        let fetched = posts.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_with_own_user_id() {
        let (posts, alice) = service().await;

        let draft = PostDraft {
            user_id: Some(alice),
            ..post_draft("alice")
        };
        let created = posts.create("alice", draft).await.unwrap();
        assert_eq!(created.user_id, alice);
    }

    #[tokio::test]
    async fn test_create_with_forged_user_id_rejected() {
        let (posts, _) = service().await;

        let draft = PostDraft {
            user_id: Some(AccountId::new(999)),
            ..post_draft("alice")
        };
        assert!(matches!(
            posts.create("alice", draft).await,
            Err(SocialError::NotOwner)
        ));
        assert!(posts.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_without_account_rejected() {
        let (posts, _) = service().await;
        assert!(matches!(
            posts.create("carol", post_draft("carol")).await,
            Err(SocialError::NotOwner)
        ));
    }

    #[tokio::test]
    async fn test_create_for_someone_else_rejected() {
        let (posts, _) = service().await;
        assert!(matches!(
            posts.create("bob", post_draft("alice")).await,
            Err(SocialError::NotOwner)
        ));
        assert!(posts.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_invalid_rejected() {
        let (posts, _) = service().await;
        let draft = PostDraft {
            likes: -3,
            ..post_draft("alice")
        };
        assert!(matches!(
            posts.create("alice", draft).await,
            Err(SocialError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update() {
        let (posts, _) = service().await;
        let created = posts.create("alice", post_draft("alice")).await.unwrap();

        let updated = posts
            .update(
                "alice",
                created.id,
                PostUpdate {
                    image_url: Some("https://img.example/q.png".to_string()),
                    description: Some("edited".to_string()),
                    likes: Some(7),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.likes, 7);
        assert_eq!(posts.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (posts, _) = service().await;
        let created = posts.create("alice", post_draft("alice")).await.unwrap();

        let updated = posts
            .update(
                "alice",
                created.id,
                PostUpdate {
                    likes: Some(1),
                    ..PostUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.likes, 1);
        assert_eq!(updated.image_url, created.image_url);
        assert_eq!(updated.description, "first light");
    }

    #[tokio::test]
    async fn test_update_by_other_user_rejected() {
        let (posts, _) = service().await;
        let created = posts.create("alice", post_draft("alice")).await.unwrap();

        let result = posts
            .update(
                "bob",
                created.id,
                PostUpdate {
                    image_url: Some("x".to_string()),
                    ..PostUpdate::default()
                },
            )
            .await;
        assert!(matches!(result, Err(SocialError::NotOwner)));
    }

    #[tokio::test]
    async fn test_ownership_checked_before_body() {
        let (posts, _) = service().await;
        let created = posts.create("alice", post_draft("alice")).await.unwrap();
        let invalid = PostUpdate {
            likes: Some(-1),
            ..PostUpdate::default()
        };

        assert!(matches!(
            posts.update("bob", created.id, invalid.clone()).await,
            Err(SocialError::NotOwner)
        ));
        assert!(matches!(
            posts.update("alice", PostId::new(42), invalid.clone()).await,
            Err(SocialError::PostNotFound)
        ));
        assert!(matches!(
            posts.update("alice", created.id, invalid).await,
            Err(SocialError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let (posts, _) = service().await;
        assert!(matches!(
            posts.get(PostId::new(42)).await,
            Err(SocialError::PostNotFound)
        ));
        assert!(matches!(
            posts.delete("alice", PostId::new(42)).await,
            Err(SocialError::PostNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let (posts, _) = service().await;
        let created = posts.create("alice", post_draft("alice")).await.unwrap();

        posts.delete("alice", created.id).await.unwrap();
        assert!(matches!(
            posts.get(created.id).await,
            Err(SocialError::PostNotFound)
        ));
    }
}

mod story_service_tests {
    use super::*;
    use crate::error::SocialError;
    use kernel::id::StoryId;

    fn service() -> StoryService<InMemoryStoryStore> {
        StoryService::new(Arc::new(InMemoryStoryStore::new()))
    }

    #[tokio::test]
    async fn test_lifecycle() {
        let stories = service();

        let created = stories.create("alice", new_story("alice")).await.unwrap();
        assert_eq!(stories.list().await.unwrap(), vec![created.clone()]);

        let updated = stories
            .update(
                "alice",
                created.id,
                StoryUpdate {
                    image_url: "https://img.example/t.png".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.image_url, "https://img.example/t.png");
        assert_eq!(updated.username, "alice");

        stories.delete("alice", created.id).await.unwrap();
        assert!(stories.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_story() {
        let stories = service();
        assert!(matches!(
            stories.get(StoryId::new(9)).await,
            Err(SocialError::StoryNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_by_other_user_rejected() {
        let stories = service();
        let created = stories.create("alice", new_story("alice")).await.unwrap();

        assert!(matches!(
            stories.delete("bob", created.id).await,
            Err(SocialError::NotOwner)
        ));
        assert!(stories.get(created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_checks_ownership_before_body() {
        let stories = service();
        let created = stories.create("alice", new_story("alice")).await.unwrap();
        let empty = StoryUpdate {
            image_url: String::new(),
        };

        assert!(matches!(
            stories.update("bob", created.id, empty.clone()).await,
            Err(SocialError::NotOwner)
        ));
        assert!(matches!(
            stories.update("alice", StoryId::new(9), empty.clone()).await,
            Err(SocialError::StoryNotFound)
        ));
        assert!(matches!(
            stories.update("alice", created.id, empty).await,
            Err(SocialError::Validation(_))
        ));
    }
}

mod http_tests {
    use super::*;
    use crate::presentation::router::social_router;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Router with `alice` and `bob` registered
    async fn app() -> (Router, Arc<TestAuth>) {
        let (auth, accounts) = auth_service(b"social-test-secret");
        register(&auth, "alice").await;
        register(&auth, "bob").await;
        let router = social_router(
            Arc::new(PostService::new(Arc::new(InMemoryPostStore::new()), accounts)),
            Arc::new(StoryService::new(Arc::new(InMemoryStoryStore::new()))),
            TokenGuard::new(auth.clone()),
        );
        (router, auth)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, bearer: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(bearer) = bearer {
            builder = builder.header(header::AUTHORIZATION, bearer);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_body() -> Value {
        json!({
            "username": "alice",
            "image_url": "https://img.example/p.png",
            "description": "hello",
            "likes": 0
        })
    }

    /// Create a post as alice and return its id
    async fn create_post(app: &Router, bearer: &str, body: Value) -> i64 {
        let (status, created) = send(app, json_request("POST", "/posts/", Some(bearer), body)).await;
        assert_eq!(status, StatusCode::CREATED);
        created["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_post_crud() {
        let (app, auth) = app().await;
        let bearer = bearer_for(&auth, "alice");

        let (status, created) =
            send(&app, json_request("POST", "/posts/", Some(&bearer), post_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["username"], "alice");
        assert_eq!(created["user_id"], 1);
        let id = created["id"].as_i64().unwrap();

        let (status, list) = send(&app, get("/posts/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, updated) = send(
            &app,
            json_request(
                "PUT",
                &format!("/posts/{id}"),
                Some(&bearer),
                json!({"image_url": "https://img.example/q.png", "description": "edit", "likes": 3}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["likes"], 3);

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/posts/{id}"))
            .header(header::AUTHORIZATION, &bearer)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, delete).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["detail"], "Post deleted successfully");

        let (status, body) = send(&app, get(&format!("/posts/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Post not found");
    }

    #[tokio::test]
    async fn test_partial_post_updates() {
        let (app, auth) = app().await;
        let bearer = bearer_for(&auth, "alice");

        let mut body = post_body();
        body["description"] = json!("keep me");
        body["likes"] = json!(42);
        let id = create_post(&app, &bearer, body).await;

        let (status, updated) = send(
            &app,
            json_request(
                "PUT",
                &format!("/posts/{id}"),
                Some(&bearer),
                json!({"image_url": "https://img.example/q.png"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["image_url"], "https://img.example/q.png");
        assert_eq!(updated["description"], "keep me");
        assert_eq!(updated["likes"], 42);

        let (status, updated) = send(
            &app,
            json_request("PUT", &format!("/posts/{id}"), Some(&bearer), json!({"likes": 43})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["likes"], 43);
        assert_eq!(updated["image_url"], "https://img.example/q.png");
        assert_eq!(updated["description"], "keep me");

        let (_, stored) = send(&app, get(&format!("/posts/{id}"))).await;
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_forged_user_id_rejected() {
        let (app, auth) = app().await;
        let bearer = bearer_for(&auth, "alice");

        let mut body = post_body();
        body["user_id"] = json!(999);
        let (status, _) = send(&app, json_request("POST", "/posts/", Some(&bearer), body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, list) = send(&app, get("/posts/")).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_writes_require_bearer() {
        let (app, _) = app().await;

        let (status, _) = send(&app, json_request("POST", "/posts/", None, post_body())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app,
            json_request("POST", "/posts/", Some("Bearer not.a.token"), post_body()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "Token is invalid or expired");
    }

    #[tokio::test]
    async fn test_token_from_other_key_rejected() {
        let (app, _) = app().await;
        let (foreign, _) = auth_service(b"someone-else");
        let bearer = bearer_for(&foreign, "alice");

        let (status, _) =
            send(&app, json_request("POST", "/posts/", Some(&bearer), post_body())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_post_is_bad_request() {
        let (app, auth) = app().await;
        let bearer = bearer_for(&auth, "alice");

        let mut body = post_body();
        body["image_url"] = json!("");
        let (status, _) = send(&app, json_request("POST", "/posts/", Some(&bearer), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_requests_are_problem_json() {
        let (app, auth) = app().await;
        let bearer = bearer_for(&auth, "alice");

        let (status, body) = send(
            &app,
            json_request("POST", "/posts/", Some(&bearer), json!({"username": "alice"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["detail"].as_str().unwrap().contains("image_url"));

        let (status, body) = send(&app, get("/posts/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let id = create_post(&app, &bearer, post_body()).await;
        let (status, body) = send(
            &app,
            json_request("PUT", &format!("/posts/{id}"), Some(&bearer), json!({"likes": "many"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_story_crud() {
        let (app, auth) = app().await;
        let bearer = bearer_for(&auth, "alice");

        let (status, created) = send(
            &app,
            json_request(
                "POST",
                "/stories/",
                Some(&bearer),
                json!({"username": "alice", "image_url": "https://img.example/s.png"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, story) = send(&app, get(&format!("/stories/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(story["image_url"], "https://img.example/s.png");

        let (status, updated) = send(
            &app,
            json_request(
                "PUT",
                &format!("/stories/{id}"),
                Some(&bearer),
                json!({"image_url": "https://img.example/t.png"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["image_url"], "https://img.example/t.png");

        let other = bearer_for(&auth, "bob");
        let delete = |bearer: &str| {
            Request::builder()
                .method("DELETE")
                .uri(format!("/stories/{id}"))
                .header(header::AUTHORIZATION, bearer)
                .body(Body::empty())
                .unwrap()
        };

        let (status, _) = send(&app, delete(&other)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, delete(&bearer)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["detail"], "Story deleted successfully");

        let (status, _) = send(&app, get("/stories/")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_story_is_not_found() {
        let (app, _) = app().await;
        let (status, body) = send(&app, get("/stories/77")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Story not found");
    }
}
