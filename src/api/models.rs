use bytes::Bytes;

/// A successful response body held in memory, plus the header we name files by.
#[derive(Debug, Clone)]
pub struct Payload {
    pub url: String,
    pub content_disposition: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Payload {
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
