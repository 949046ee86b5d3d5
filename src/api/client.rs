use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::api::{GenerateContentRequest, GenerateContentResponse};
use crate::core::constants::API_BASE_URL;

/// Transport-level failure: the endpoint could not be reached, or the body it
/// returned was not JSON.
#[derive(Debug)]
pub enum TransportError {
    Http(reqwest::Error),
    MalformedBody(serde_json::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Http(source) => write!(f, "request failed: {source}"),
            TransportError::MalformedBody(source) => {
                write!(f, "response body was not JSON: {source}")
            }
        }
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TransportError::Http(source) => Some(source),
            TransportError::MalformedBody(source) => Some(source),
        }
    }
}

/// The outbound boundary to the generative-language service. Dispatch code
/// talks to this trait; tests substitute canned implementations.
#[async_trait]
pub trait GenerateContent: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError>;
}

/// HTTP client addressing `{base}/models/{model}:generateContent`.
pub struct HttpGenerateClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpGenerateClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(API_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            model,
            self.api_key
        )
    }
}

#[async_trait]
impl GenerateContent for HttpGenerateClient {
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError> {
        debug!(model, "issuing generateContent request");
        let response = self
            .client
            .post(self.endpoint(model))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(TransportError::Http)?;

        // Error payloads arrive with non-2xx statuses but a well-formed JSON
        // body; read the body regardless of status and let interpretation
        // decide.
        let body = response.text().await.map_err(TransportError::Http)?;
        serde_json::from_str(&body).map_err(TransportError::MalformedBody)
    }
}
