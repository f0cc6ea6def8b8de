//! JSON snapshot adapter.
//!
//! Same collection semantics as the in-memory adapter, plus one JSON
//! document on disk holding all three collections and the verifier
//! configuration. The document is rewritten after every committed batch,
//! via a temp file and rename so a crash mid-write never leaves a torn
//! snapshot behind.

use crate::memory::Collections;
use crate::traits::{ReferralStore, WriteBatch};
use crate::{StoreError, StoreResult};
use chainrefer_types::{
    ApplicationRecord, CandidateRecord, JobId, JobRecord, WalletAddress, SCHEMA_VERSION,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockWriteGuard};
use tracing::debug;

/// On-disk snapshot document.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    schema_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    verifier: Option<WalletAddress>,
    candidates: Vec<CandidateRecord>,
    jobs: Vec<JobRecord>,
    applications: Vec<ApplicationRecord>,
}

/// File-backed referral store adapter.
#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
    inner: RwLock<Collections>,
}

impl SnapshotStore {
    /// Open a store backed by the given snapshot file, loading any
    /// existing document. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut collections = Collections::default();

        if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let document: SnapshotDocument = serde_json::from_str(&raw)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;

            debug!(
                path = %path.display(),
                candidates = document.candidates.len(),
                jobs = document.jobs.len(),
                applications = document.applications.len(),
                "loaded referral snapshot"
            );

            let mut batch = WriteBatch::new();
            for record in document.candidates {
                batch = batch.with_candidate(record);
            }
            for record in document.jobs {
                batch = batch.with_job(record);
            }
            for record in document.applications {
                batch = batch.with_application(record);
            }
            collections.apply(batch);
            if let Some(verifier) = document.verifier {
                collections.set_verifier(verifier)?;
            }
        }

        Ok(Self {
            path,
            inner: RwLock::new(collections),
        })
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Collections>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("collections lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collections>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("collections lock poisoned".to_string()))
    }

    /// Rewrite the snapshot document under the held write lock.
    fn flush(&self, collections: &Collections) -> StoreResult<()> {
        let document = SnapshotDocument {
            schema_version: SCHEMA_VERSION.to_string(),
            verifier: collections.verifier_raw(),
            candidates: collections.candidates(),
            jobs: collections.jobs(),
            applications: collections.applications(),
        };
        let serialized = serde_json::to_vec_pretty(&document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "flushed referral snapshot");
        Ok(())
    }
}

impl ReferralStore for SnapshotStore {
    fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut guard = self.write()?;
        guard.apply(batch);
        self.flush(&guard)
    }

    fn candidate(&self, address: &WalletAddress) -> StoreResult<Option<CandidateRecord>> {
        Ok(self.read()?.candidate(address))
    }

    fn candidates(&self) -> StoreResult<Vec<CandidateRecord>> {
        Ok(self.read()?.candidates())
    }

    fn job(&self, id: &JobId) -> StoreResult<Option<JobRecord>> {
        Ok(self.read()?.job(id))
    }

    fn jobs(&self) -> StoreResult<Vec<JobRecord>> {
        Ok(self.read()?.jobs())
    }

    fn application(
        &self,
        job_id: &JobId,
        candidate: &WalletAddress,
    ) -> StoreResult<Option<ApplicationRecord>> {
        Ok(self.read()?.application(job_id, candidate))
    }

    fn applications(&self) -> StoreResult<Vec<ApplicationRecord>> {
        Ok(self.read()?.applications())
    }

    fn verifier(&self) -> StoreResult<WalletAddress> {
        Ok(self.read()?.verifier())
    }

    fn set_verifier(&self, address: WalletAddress) -> StoreResult<()> {
        let mut guard = self.write()?;
        guard.set_verifier(address)?;
        self.flush(&guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainrefer_types::{CandidateProfile, ResumeStatus};
    use chrono::Utc;

    fn candidate(address: &str) -> CandidateRecord {
        CandidateRecord {
            address: WalletAddress::new(address),
            profile: CandidateProfile {
                name: "Ada".to_string(),
                email: "ada@example.edu".to_string(),
                institution: "State University".to_string(),
                department: "CS".to_string(),
                graduation_year: 2025,
            },
            resume_digest: Some("d1".to_string()),
            resume_cid: None,
            status: ResumeStatus::Unverified,
            submitted_at: Utc::now(),
            verified_by: None,
            verified_at: None,
            applied_jobs: vec![],
            references: vec![],
        }
    }

    #[test]
    fn snapshot_round_trips_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("referrals.json");

        {
            let store = SnapshotStore::open(&path).unwrap();
            store.put_candidate(candidate("0xa1")).unwrap();
            store.put_candidate(candidate("0xa2")).unwrap();
            store.set_verifier(WalletAddress::new("0xv")).unwrap();
        }

        let reopened = SnapshotStore::open(&path).unwrap();
        let listed = reopened.candidates().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].address, WalletAddress::new("0xa1"));
        assert_eq!(reopened.verifier().unwrap(), WalletAddress::new("0xv"));
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("fresh.json")).unwrap();
        assert!(store.candidates().unwrap().is_empty());
        assert!(store.jobs().unwrap().is_empty());
    }

    #[test]
    fn corrupt_snapshot_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("referrals.json");
        fs::write(&path, "not json").unwrap();

        let result = SnapshotStore::open(&path);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
