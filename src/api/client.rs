use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::models::{ClientConfig, Payload};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status} {reason}")]
    Status { status: u16, reason: String },
}

impl FetchError {
    fn from_status(status: StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("falling back to default HTTP client: {}", e);
                Client::new()
            });
        Self { client }
    }

    /// GET `url` and buffer the whole body.
    ///
    /// Non-2xx responses are rejected before the body is read.
    pub async fn fetch(&self, url: &str) -> Result<Payload> {
        tracing::debug!(%url, "sending request");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, %status, "rejecting non-success response");
            return Err(FetchError::from_status(status));
        }

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                // Raw UTF-8 filenames are common, so don't require visible ASCII
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        };
        let content_disposition = header(CONTENT_DISPOSITION);
        let content_type = header(CONTENT_TYPE);

        let body = response.bytes().await?;
        tracing::debug!(%url, bytes = body.len(), "response body buffered");

        Ok(Payload {
            url: url.to_string(),
            content_disposition,
            content_type,
            body,
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
