//! Pinata pinning-service publish adapter.

use async_trait::async_trait;
use reqwest::{multipart, Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::errors::PublishError;
use crate::domain::ports::PublishPort;

const PINATA_API_BASE: &str = "https://api.pinata.cloud";
const UPLOAD_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// Publishes bytes through Pinata's `pinFileToIPFS` endpoint.
pub struct PinataClient {
    client: Client,
    base_url: String,
    jwt: String,
}

impl PinataClient {
    /// Creates a client against the production Pinata API.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or the token is
    /// empty.
    pub fn new(jwt: impl Into<String>) -> Result<Self, PublishError> {
        Self::with_base_url(PINATA_API_BASE, jwt)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or the token is
    /// empty.
    pub fn with_base_url(
        base_url: impl Into<String>,
        jwt: impl Into<String>,
    ) -> Result<Self, PublishError> {
        let jwt = jwt.into();
        if jwt.trim().is_empty() {
            return Err(PublishError::MissingCredentials);
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| PublishError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            jwt,
        })
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> PublishError {
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error.unwrap_or_else(|| format!("HTTP {status}")),
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PublishError::MissingCredentials,
            _ => PublishError::rejected(status.as_u16(), message),
        }
    }
}

#[async_trait]
impl PublishPort for PinataClient {
    async fn publish(&self, bytes: &[u8], name: &str) -> Result<String, PublishError> {
        let url = format!("{}/pinning/pinFileToIPFS", self.base_url);

        debug!(name = %name, size = bytes.len(), "Uploading to Pinata");

        let metadata = serde_json::json!({ "name": name }).to_string();
        let options = serde_json::json!({ "cidVersion": 0 }).to_string();

        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::bytes(bytes.to_vec()).file_name(name.to_string()),
            )
            .text("pinataMetadata", metadata)
            .text("pinataOptions", options);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach Pinata");
                if e.is_timeout() {
                    PublishError::network("upload timed out")
                } else {
                    PublishError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body: PinResponse = response
            .json()
            .await
            .map_err(|e| PublishError::invalid_response(format!("failed to parse response: {e}")))?;

        body.ipfs_hash
            .filter(|hash| !hash.is_empty())
            .ok_or_else(|| PublishError::invalid_response("response carried no IpfsHash"))
    }

    fn backend_name(&self) -> &'static str {
        "pinata"
    }
}

impl std::fmt::Debug for PinataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinataClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_rejected() {
        let err = PinataClient::new("  ").unwrap_err();
        assert!(matches!(err, PublishError::MissingCredentials));
    }

    #[test]
    fn test_response_parsing() {
        let body: PinResponse = serde_json::from_str(r#"{"IpfsHash":"Qmabc123"}"#).unwrap();
        assert_eq!(body.ipfs_hash.as_deref(), Some("Qmabc123"));

        let empty: PinResponse = serde_json::from_str(r"{}").unwrap();
        assert!(empty.ipfs_hash.is_none());
    }
}
