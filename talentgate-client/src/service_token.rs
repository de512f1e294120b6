//! Service token provisioning

use chrono::{DateTime, Duration, Utc};
use talentgate_auth::{IssueError, TokenIssuer};
use tokio::sync::Mutex;
use tracing::debug;

/// Re-mint when the cached token is this close to expiry
const RENEWAL_MARGIN_SECONDS: i64 = 30;

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Mints service tokens for outbound calls, caching the current one briefly
///
/// Tokens are short-lived (minutes, not hours), so the cache only avoids
/// re-signing on every request within the same window.
pub struct ServiceTokenProvider {
    issuer: TokenIssuer,
    service_name: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceTokenProvider {
    pub fn new(issuer: TokenIssuer, service_name: impl Into<String>) -> Self {
        Self {
            issuer,
            service_name: service_name.into(),
            cached: Mutex::new(None),
        }
    }

    /// Name this provider identifies as
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Current service token, re-minted when near expiry
    pub async fn token(&self) -> Result<String, IssueError> {
        let mut cached = self.cached.lock().await;
        let margin = Duration::seconds(RENEWAL_MARGIN_SECONDS);

        if let Some(entry) = cached.as_ref() {
            if entry.expires_at - margin > Utc::now() {
                return Ok(entry.token.clone());
            }
        }

        debug!("Minting new service token for {}", self.service_name);
        let token = self.issuer.issue_service_token(&self.service_name)?;
        let expires_at = Utc::now() + self.issuer.service_ttl();
        *cached = Some(CachedToken {
            token: token.clone(),
            expires_at,
        });
        Ok(token)
    }
}
