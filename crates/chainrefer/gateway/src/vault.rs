//! Content-addressable resume vault and the digest primitive.
//!
//! The digest recorded on a candidate is computed here, independently of
//! whatever content id the pinning service assigns; verification later
//! re-hashes the retrieved bytes and compares.

use crate::VaultError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Deterministic SHA-256 hex digest over raw file bytes.
pub fn resume_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// A pinned artifact: content id plus a retrieval URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedArtifact {
    pub content_id: String,
    pub url: String,
}

/// Content-addressable file-pinning boundary. Used only for the resume
/// artifact.
#[async_trait]
pub trait ResumeVault: Send + Sync {
    /// Pin raw bytes, returning the assigned content id and URL.
    async fn store(&self, bytes: Vec<u8>) -> Result<PinnedArtifact, VaultError>;

    /// Retrieve pinned bytes, `None` when the content id is unknown.
    async fn retrieve(&self, content_id: &str) -> Result<Option<Vec<u8>>, VaultError>;
}

/// In-memory vault adapter. Content ids are derived from the byte digest,
/// so re-pinning identical bytes yields the same id.
#[derive(Debug)]
pub struct MemoryVault {
    gateway_base: String,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self {
            gateway_base: "memory://vault".to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResumeVault for MemoryVault {
    async fn store(&self, bytes: Vec<u8>) -> Result<PinnedArtifact, VaultError> {
        let content_id = format!("cid-{}", &resume_digest(&bytes)[..32]);
        let url = format!("{}/{}", self.gateway_base, content_id);

        let mut objects = self
            .objects
            .write()
            .map_err(|_| VaultError::Transport("vault lock poisoned".to_string()))?;
        objects.insert(content_id.clone(), bytes);
        debug!(content_id = %content_id, "pinned resume artifact");

        Ok(PinnedArtifact { content_id, url })
    }

    async fn retrieve(&self, content_id: &str) -> Result<Option<Vec<u8>>, VaultError> {
        let objects = self
            .objects
            .read()
            .map_err(|_| VaultError::Transport("vault lock poisoned".to_string()))?;
        Ok(objects.get(content_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic_sha256_hex() {
        let first = resume_digest(b"resume bytes");
        let second = resume_digest(b"resume bytes");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn pinned_bytes_round_trip_and_match_digest() {
        let vault = MemoryVault::new();
        let bytes = b"candidate resume".to_vec();
        let digest = resume_digest(&bytes);

        let artifact = vault.store(bytes.clone()).await.unwrap();
        let retrieved = vault.retrieve(&artifact.content_id).await.unwrap().unwrap();

        assert_eq!(retrieved, bytes);
        assert_eq!(resume_digest(&retrieved), digest);
    }

    #[tokio::test]
    async fn unknown_content_id_is_none() {
        let vault = MemoryVault::new();
        assert!(vault.retrieve("cid-missing").await.unwrap().is_none());
    }
}
