//! Transport seam between the orchestrator and the generation service.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use artweave_core::anchor::ArtworkAnchor;

use super::{CompareError, PollResponse, StartRequest, StartResponse};
use crate::config::ClientConfig;

/// Network capability the orchestrator needs.
#[async_trait]
pub trait CompareTransport: Send + Sync {
    /// Starts a comparison job.
    async fn start(&self, request: &StartRequest) -> Result<StartResponse, CompareError>;

    /// Fetches the current state of a job.
    async fn poll(&self, compare_id: &str) -> Result<PollResponse, CompareError>;
}

/// JSON-over-HTTP transport for the generation service.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for the configured service.
    pub fn new(config: &ClientConfig) -> Result<Self, CompareError> {
        let client = Client::builder()
            .timeout(config.overall_timeout())
            .build()
            .map_err(|err| {
                warn!(err:err; "Failed to build HTTP client");
                CompareError::fetch("")
            })?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Lists the artworks of a painting set.
    pub async fn paintings(&self, set: &str) -> Result<Vec<ArtworkAnchor>, CompareError> {
        debug!(set = set; "Fetching paintings");
        let response = self
            .client
            .get(self.url("/api/paintings"))
            .query(&[("set", set)])
            .send()
            .await;
        decode(response).await
    }
}

#[async_trait]
impl CompareTransport for HttpTransport {
    async fn start(&self, request: &StartRequest) -> Result<StartResponse, CompareError> {
        let response = self
            .client
            .post(self.url("/api/compare/start"))
            .json(request)
            .send()
            .await;
        decode(response).await
    }

    async fn poll(&self, compare_id: &str) -> Result<PollResponse, CompareError> {
        let response = self
            .client
            .get(self.url(&format!("/api/compare/{compare_id}")))
            .send()
            .await;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Result<Response>,
) -> Result<T, CompareError> {
    let response = response.map_err(|err| {
        warn!(err:err; "Request failed");
        CompareError::fetch("")
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|err| {
        warn!(err:err; "Failed to read response body");
        CompareError::fetch("")
    })?;

    if !status.is_success() {
        warn!(status = status.as_u16(); "Service returned an error");
        return Err(CompareError::fetch(error_detail(&body).unwrap_or_default()));
    }

    serde_json::from_str(&body).map_err(|err| {
        warn!(err:err; "Failed to decode response");
        CompareError::fetch("")
    })
}

/// Pulls the human-readable detail out of an error body.
///
/// Accepts `{"detail": "..."}` and the validation form
/// `{"detail": [{"msg": "..."}]}`.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_string() {
        assert_eq!(
            error_detail(r#"{"detail": "Painting not found in selected set."}"#),
            Some("Painting not found in selected set.".to_string())
        );
    }

    #[test]
    fn test_error_detail_validation_list() {
        let body = r#"{"detail": [{"loc": ["body", "set"], "msg": "String should match pattern"}]}"#;
        assert_eq!(
            error_detail(body),
            Some("String should match pattern".to_string())
        );
    }

    #[test]
    fn test_error_detail_unusable_bodies() {
        assert_eq!(error_detail("Internal Server Error"), None);
        assert_eq!(error_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(error_detail(r#"{"detail": 42}"#), None);
    }

    #[test]
    fn test_url_joins_base() {
        let config = ClientConfig::default();
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.url("/api/compare/abc"),
            "http://localhost:8000/api/compare/abc"
        );
    }
}
