//! nft.storage publish adapter.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::errors::PublishError;
use crate::domain::ports::PublishPort;

const NFT_STORAGE_API_BASE: &str = "https://api.nft.storage";
const UPLOAD_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    ok: bool,
    value: Option<UploadValue>,
}

#[derive(Debug, Deserialize)]
struct UploadValue {
    cid: Option<String>,
}

/// Publishes bytes to the nft.storage content-addressed network.
///
/// Unlike Pinata the upload endpoint takes the raw body directly; the
/// suggested name only travels as a header hint.
pub struct NftStorageClient {
    client: Client,
    base_url: String,
    token: String,
}

impl NftStorageClient {
    /// Creates a client against the production nft.storage API.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or the token is
    /// empty.
    pub fn new(token: impl Into<String>) -> Result<Self, PublishError> {
        Self::with_base_url(NFT_STORAGE_API_BASE, token)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or the token is
    /// empty.
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, PublishError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(PublishError::MissingCredentials);
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| PublishError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token,
        })
    }
}

#[async_trait]
impl PublishPort for NftStorageClient {
    async fn publish(&self, bytes: &[u8], name: &str) -> Result<String, PublishError> {
        let url = format!("{}/upload", self.base_url);

        debug!(name = %name, size = bytes.len(), "Uploading to nft.storage");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Content-Type", "image/png")
            .header("X-NAME", name)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach nft.storage");
                if e.is_timeout() {
                    PublishError::network("upload timed out")
                } else {
                    PublishError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    PublishError::MissingCredentials
                }
                _ => PublishError::rejected(status.as_u16(), format!("HTTP {status}")),
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| PublishError::invalid_response(format!("failed to parse response: {e}")))?;

        if !body.ok {
            return Err(PublishError::invalid_response("upload not acknowledged"));
        }

        body.value
            .and_then(|v| v.cid)
            .filter(|cid| !cid.is_empty())
            .ok_or_else(|| PublishError::invalid_response("response carried no cid"))
    }

    fn backend_name(&self) -> &'static str {
        "nft.storage"
    }
}

impl std::fmt::Debug for NftStorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NftStorageClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
