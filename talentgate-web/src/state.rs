//! Application state

use crate::store::{CompanyStore, RefreshTokenStore, UserStore};
use crate::{WebConfig, WebError, WebResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use talentgate_auth::{TokenIssuer, TokenVerifier};
use tracing::info;

/// Shared state for all request handlers
///
/// The issuer and verifier are pure functions of the shared secret; no
/// in-process mutable state is required for verification.
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Token minting (login, refresh, service tokens)
    pub issuer: Arc<TokenIssuer>,
    /// Local stateless token verification
    pub verifier: Arc<TokenVerifier>,
    /// User accounts
    pub users: UserStore,
    /// Refresh token records (revocation state)
    pub refresh_tokens: RefreshTokenStore,
    /// Companies and memberships
    pub companies: CompanyStore,
}

impl AppState {
    /// Create a new application state
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| WebError::Config(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);

        // An in-memory database exists per connection, so the pool must be
        // pinned to a single long-lived one
        let mut pool_options = SqlitePoolOptions::new();
        if config.database_url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| WebError::Database(e.to_string()))?;

        let users = UserStore::new(pool.clone());
        let refresh_tokens = RefreshTokenStore::new(pool.clone());
        let companies = CompanyStore::new(pool.clone());

        users
            .create_tables()
            .await
            .map_err(|e| WebError::Database(e.to_string()))?;
        refresh_tokens
            .create_tables()
            .await
            .map_err(|e| WebError::Database(e.to_string()))?;
        companies
            .create_tables()
            .await
            .map_err(|e| WebError::Database(e.to_string()))?;

        users
            .ensure_default_super_admin()
            .await
            .map_err(|e| WebError::Database(e.to_string()))?;

        let issuer = Arc::new(TokenIssuer::new(&config.auth));
        let verifier = Arc::new(TokenVerifier::new(&config.auth));

        info!("Application state initialized");
        Ok(Self {
            config,
            issuer,
            verifier,
            users,
            refresh_tokens,
            companies,
        })
    }
}
