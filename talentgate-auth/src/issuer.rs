//! Token minting

use crate::claims::Claims;
use crate::keys::Keys;
use crate::roles::Role;
use chrono::Duration;
use jsonwebtoken::{encode, Header};
use talentgate_core::{AuthConfig, UserId};
use tracing::warn;

/// Errors raised while minting a token
///
/// Minting cannot fail except on encoding problems; a missing signing secret
/// is caught at startup and never reaches here.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error("Failed to encode token")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

/// Mints access, refresh, and service tokens against the shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Keys,
    access_ttl: Duration,
    refresh_ttl: Duration,
    service_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            keys: Keys::new(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_ttl_minutes),
            refresh_ttl: Duration::days(config.refresh_ttl_days),
            service_ttl: Duration::seconds(config.service_ttl_seconds),
        }
    }

    /// Mint an access token carrying the user's roles snapshot
    pub fn issue_access_token(
        &self,
        user_id: UserId,
        email: &str,
        roles: Vec<Role>,
    ) -> Result<String, IssueError> {
        let claims = Claims::new_access(user_id, email.to_string(), roles, self.access_ttl);
        self.encode(&claims)
    }

    /// Mint a refresh token; the matching server-side record is persisted by
    /// the caller
    pub fn issue_refresh_token(&self, user_id: UserId) -> Result<String, IssueError> {
        let claims = Claims::new_refresh(user_id, self.refresh_ttl);
        self.encode(&claims)
    }

    /// Mint a short-lived service token carrying only the service name
    pub fn issue_service_token(&self, service_name: &str) -> Result<String, IssueError> {
        let claims = Claims::new_service(service_name.to_string(), self.service_ttl);
        self.encode(&claims)
    }

    /// Access token lifetime in seconds, for `expires_in` response fields
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Refresh token lifetime
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Service token lifetime
    pub fn service_ttl(&self) -> Duration {
        self.service_ttl
    }

    fn encode(&self, claims: &Claims) -> Result<String, IssueError> {
        encode(&Header::default(), claims, &self.keys.encoding).map_err(|e| {
            warn!("Failed to encode token: {}", e);
            IssueError::Encode(e)
        })
    }
}
