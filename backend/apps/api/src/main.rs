//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use the crate error types (`AuthError`, `SocialError`).

mod config;

use std::sync::Arc;

use auth::{AuthService, PgAccountStore, TokenGuard, auth_router};
use axum::{
    Router,
    http::{Method, header},
};
use platform::password::Argon2Hasher;
use social::{PgPostStore, PgStoryStore, PostService, StoryService, social_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,social=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        algorithm = ?config.auth.token_algorithm,
        access_token_ttl_secs = config.auth.access_token_ttl.as_secs(),
        "Configuration loaded"
    );

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth
    let auth_config = Arc::new(config.auth);
    let hasher = Argon2Hasher::new(auth_config.password_pepper.clone());
    let accounts = Arc::new(PgAccountStore::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(accounts.clone(), hasher, auth_config)?);

    // Posts and stories
    let posts = Arc::new(PostService::new(
        Arc::new(PgPostStore::new(pool.clone())),
        accounts,
    ));
    let stories = Arc::new(StoryService::new(Arc::new(PgStoryStore::new(pool))));
    let tokens = TokenGuard::new(auth_service.clone());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .merge(auth_router(auth_service))
        .merge(social_router(posts, stories, tokens))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
