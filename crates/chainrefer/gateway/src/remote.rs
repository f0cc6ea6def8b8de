//! HTTP pinning client for a Pinata-style pinning API.
//!
//! Enabled with the `remote` feature. The in-memory vault covers tests and
//! local runs; this adapter talks to a real gateway.

use crate::{PinnedArtifact, ResumeVault, VaultError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Response body of a successful pin request.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// HTTP vault adapter for a pinning service.
pub struct PinningClient {
    client: Client,
    api_url: String,
    gateway_url: String,
    api_key: String,
    secret_key: String,
}

impl PinningClient {
    /// Build a client against the given pinning API and retrieval gateway.
    pub fn new(
        api_url: &str,
        gateway_url: &str,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, VaultError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| VaultError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        })
    }
}

#[async_trait]
impl ResumeVault for PinningClient {
    async fn store(&self, bytes: Vec<u8>) -> Result<PinnedArtifact, VaultError> {
        let response = self
            .client
            .post(format!("{}/pinning/pinFileToIPFS", self.api_url))
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.secret_key)
            .body(bytes)
            .send()
            .await
            .map_err(|e| VaultError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "pinning service refused artifact");
            return Err(VaultError::Rejected(format!("pin failed with {status}")));
        }

        let pinned: PinResponse = response
            .json()
            .await
            .map_err(|e| VaultError::Transport(e.to_string()))?;
        debug!(content_id = %pinned.ipfs_hash, "pinned resume artifact");

        let url = format!("{}/{}", self.gateway_url, pinned.ipfs_hash);
        Ok(PinnedArtifact {
            content_id: pinned.ipfs_hash,
            url,
        })
    }

    async fn retrieve(&self, content_id: &str) -> Result<Option<Vec<u8>>, VaultError> {
        let response = self
            .client
            .get(format!("{}/{}", self.gateway_url, content_id))
            .send()
            .await
            .map_err(|e| VaultError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(VaultError::Transport(format!(
                "retrieval failed with {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VaultError::Transport(e.to_string()))?;
        Ok(Some(bytes.to_vec()))
    }
}
