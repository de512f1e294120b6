//! Outbound HTTP client for service-to-service calls

use crate::service_token::ServiceTokenProvider;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use talentgate_auth::IssueError;
use tracing::debug;

/// Header carrying the service credential
pub const SERVICE_TOKEN_HEADER: &str = "X-Service-Token";
/// Optional cross-check header naming the calling service
pub const SERVICE_NAME_HEADER: &str = "X-Service-Name";

/// Errors raised by outbound service calls
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to mint service token: {0}")]
    Token(#[from] IssueError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

/// Thin typed wrapper over reqwest that attaches the service credential
/// headers to every request
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<ServiceTokenProvider>,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<ServiceTokenProvider>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            tokens,
        }
    }

    /// GET a JSON resource from a neighboring service
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Service call: GET {}", url);

        let token = self.tokens.token().await?;
        let response = self
            .client
            .get(&url)
            .header(SERVICE_TOKEN_HEADER, token)
            .header(SERVICE_NAME_HEADER, self.tokens.service_name())
            .send()
            .await?;

        Self::decode(response, url).await
    }

    /// POST a JSON body to a neighboring service
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Service call: POST {}", url);

        let token = self.tokens.token().await?;
        let response = self
            .client
            .post(&url)
            .header(SERVICE_TOKEN_HEADER, token)
            .header(SERVICE_NAME_HEADER, self.tokens.service_name())
            .json(body)
            .send()
            .await?;

        Self::decode(response, url).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        url: String,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.json().await?)
    }
}
