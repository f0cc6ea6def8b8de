//! In-memory reference adapter for the referral store.
//!
//! Deterministic and test-friendly. Deployments that must survive a
//! restart use [`SnapshotStore`](crate::SnapshotStore), which shares the
//! same collection semantics and adds a JSON snapshot file.

use crate::traits::{ReferralStore, WriteBatch, DEFAULT_VERIFIER};
use crate::{StoreError, StoreResult};
use chainrefer_types::{ApplicationRecord, CandidateRecord, JobId, JobRecord, WalletAddress};
use std::collections::HashMap;
use std::sync::RwLock;

/// The three collections plus verifier configuration. Maps hold the
/// records, order vectors preserve insertion order for `list` reads.
#[derive(Debug, Default)]
pub(crate) struct Collections {
    candidates: HashMap<WalletAddress, CandidateRecord>,
    candidate_order: Vec<WalletAddress>,
    jobs: HashMap<JobId, JobRecord>,
    job_order: Vec<JobId>,
    applications: HashMap<(JobId, WalletAddress), ApplicationRecord>,
    application_order: Vec<(JobId, WalletAddress)>,
    verifier: Option<WalletAddress>,
}

impl Collections {
    /// Apply every upsert in the batch. Last write wins per key; order
    /// vectors only grow on first insertion.
    pub(crate) fn apply(&mut self, batch: WriteBatch) {
        for record in batch.candidates {
            let key = record.address.clone();
            if self.candidates.insert(key.clone(), record).is_none() {
                self.candidate_order.push(key);
            }
        }
        for record in batch.jobs {
            let key = record.id.clone();
            if self.jobs.insert(key.clone(), record).is_none() {
                self.job_order.push(key);
            }
        }
        for record in batch.applications {
            let key = record.key();
            if self.applications.insert(key.clone(), record).is_none() {
                self.application_order.push(key);
            }
        }
    }

    pub(crate) fn candidate(&self, address: &WalletAddress) -> Option<CandidateRecord> {
        self.candidates.get(address).cloned()
    }

    pub(crate) fn candidates(&self) -> Vec<CandidateRecord> {
        self.candidate_order
            .iter()
            .filter_map(|key| self.candidates.get(key).cloned())
            .collect()
    }

    pub(crate) fn job(&self, id: &JobId) -> Option<JobRecord> {
        self.jobs.get(id).cloned()
    }

    pub(crate) fn jobs(&self) -> Vec<JobRecord> {
        self.job_order
            .iter()
            .filter_map(|key| self.jobs.get(key).cloned())
            .collect()
    }

    pub(crate) fn application(
        &self,
        job_id: &JobId,
        candidate: &WalletAddress,
    ) -> Option<ApplicationRecord> {
        self.applications
            .get(&(job_id.clone(), candidate.clone()))
            .cloned()
    }

    pub(crate) fn applications(&self) -> Vec<ApplicationRecord> {
        self.application_order
            .iter()
            .filter_map(|key| self.applications.get(key).cloned())
            .collect()
    }

    pub(crate) fn verifier(&self) -> WalletAddress {
        self.verifier
            .clone()
            .unwrap_or_else(|| WalletAddress::new(DEFAULT_VERIFIER))
    }

    pub(crate) fn set_verifier(&mut self, address: WalletAddress) -> StoreResult<()> {
        if self.verifier.is_some() {
            return Err(StoreError::AlreadyConfigured);
        }
        self.verifier = Some(address);
        Ok(())
    }

    pub(crate) fn verifier_raw(&self) -> Option<WalletAddress> {
        self.verifier.clone()
    }
}

/// In-memory referral store adapter.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Collections>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("collections lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Collections>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("collections lock poisoned".to_string()))
    }
}

impl ReferralStore for MemoryStore {
    fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        self.write()?.apply(batch);
        Ok(())
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
        self.write()?.set_verifier(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainrefer_types::{ApplicationStatus, CandidateProfile, ResumeStatus};
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
    fn upsert_is_idempotent_per_key() {
        let store = MemoryStore::new();
        store.put_candidate(candidate("0xAAA")).unwrap();
        store.put_candidate(candidate("0xaaa")).unwrap();

        assert_eq!(store.candidates().unwrap().len(), 1);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = MemoryStore::new();
        store.put_candidate(candidate("0xa1")).unwrap();
        store.put_candidate(candidate("0xa2")).unwrap();
        store.put_candidate(candidate("0xa1")).unwrap();

        let listed = store.candidates().unwrap();
        assert_eq!(listed[0].address, WalletAddress::new("0xa1"));
        assert_eq!(listed[1].address, WalletAddress::new("0xa2"));
    }

    #[test]
    fn verifier_defaults_until_configured() {
        let store = MemoryStore::new();
        assert_eq!(store.verifier().unwrap(), WalletAddress::new(DEFAULT_VERIFIER));

        store.set_verifier(WalletAddress::new("0xv")).unwrap();
        assert_eq!(store.verifier().unwrap(), WalletAddress::new("0xv"));

        let second = store.set_verifier(WalletAddress::new("0xother"));
        assert!(matches!(second, Err(StoreError::AlreadyConfigured)));
    }

    #[test]
    fn batch_applies_all_collections_together() {
        let store = MemoryStore::new();
        let job_id = JobId::new("job-1");
        let wallet = WalletAddress::new("0xcand");

        let job = JobRecord {
            id: job_id.clone(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            category: chainrefer_types::JobCategory::FullTime,
            description: String::new(),
            requirements: vec![],
            posted_by: WalletAddress::new("0xowner"),
            posted_by_name: "Owner".to_string(),
            posted_at: Utc::now(),
            applicants: vec![wallet.clone()],
            shortlisted: vec![],
            referred: vec![],
            references: vec![],
        };
        let application = ApplicationRecord {
            job_id: job_id.clone(),
            candidate: wallet.clone(),
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
            reference: "0xref".to_string(),
        };

        store
            .commit(
                WriteBatch::new()
                    .with_candidate(candidate("0xcand"))
                    .with_job(job)
                    .with_application(application),
            )
            .unwrap();

        assert!(store.candidate(&wallet).unwrap().is_some());
        assert!(store.job(&job_id).unwrap().is_some());
        assert!(store.application(&job_id, &wallet).unwrap().is_some());
        assert_eq!(store.applications_for_job(&job_id).unwrap().len(), 1);
    }
}
