//! Talentgate Auth Service
//!
//! The canonical identity service: issues user tokens at login, persists
//! refresh-token records, owns company membership rows, and serves the
//! who-am-I endpoint other services fall back on.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

// Re-export main types
pub use error::ApiError;
pub use server::{Server, ServerBuilder};
pub use state::AppState;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    Router,
};
use talentgate_core::{AuthConfig, CoreResult};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([
            "http://localhost:3000".parse::<HeaderValue>().unwrap(),
            "http://127.0.0.1:3000".parse::<HeaderValue>().unwrap(),
        ]))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_credentials(true)
        .allow_headers([
            AUTHORIZATION,
            ACCEPT,
            CONTENT_TYPE,
            HeaderName::from_static("x-service-token"),
            HeaderName::from_static("x-service-name"),
        ]);

    Router::new()
        .nest("/api", routes::api_routes())
        .nest("/internal", routes::internal_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Enable development mode
    pub dev_mode: bool,
    /// Token signing and trust configuration
    pub auth: AuthConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite::memory:".to_string(),
            dev_mode: false,
            auth: AuthConfig::new("talentgate-dev-secret-change-in-production"),
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables
    ///
    /// Fails when the shared signing secret is absent; that is a startup
    /// error, never a per-call one.
    pub fn from_env() -> CoreResult<Self> {
        Ok(Self {
            host: std::env::var("TALENTGATE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("TALENTGATE_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            database_url: std::env::var("TALENTGATE_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite::memory:".to_string()),
            dev_mode: std::env::var("TALENTGATE_DEV_MODE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            auth: AuthConfig::from_env()?,
        })
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;
