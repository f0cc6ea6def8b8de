use crate::StoreResult;
use chainrefer_types::{ApplicationRecord, CandidateRecord, JobId, JobRecord, WalletAddress};

/// Verifier identity used when a deployment never configures one.
pub const DEFAULT_VERIFIER: &str =
    "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

/// A set of upserts applied to the store as one unit.
///
/// An action that touches more than one record (an application plus its
/// parent job plus the candidate's audit trail) builds a single batch, so
/// a reader can never observe the application updated but the job stale.
#[derive(Clone, Debug, Default)]
pub struct WriteBatch {
    pub(crate) candidates: Vec<CandidateRecord>,
    pub(crate) jobs: Vec<JobRecord>,
    pub(crate) applications: Vec<ApplicationRecord>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidate(mut self, record: CandidateRecord) -> Self {
        self.candidates.push(record);
        self
    }

    pub fn with_job(mut self, record: JobRecord) -> Self {
        self.jobs.push(record);
        self
    }

    pub fn with_application(mut self, record: ApplicationRecord) -> Self {
        self.applications.push(record);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty() && self.jobs.is_empty() && self.applications.is_empty()
    }
}

/// Durable key-value record store for the referral workflow.
///
/// Reads return whole records; there is no partial-field update. Callers
/// read-modify-write and hand the result back through [`commit`].
///
/// [`commit`]: ReferralStore::commit
pub trait ReferralStore: Send + Sync {
    /// Apply every upsert in the batch as one unit (last-write-wins per key).
    fn commit(&self, batch: WriteBatch) -> StoreResult<()>;

    fn candidate(&self, address: &WalletAddress) -> StoreResult<Option<CandidateRecord>>;

    /// All candidates, insertion order.
    fn candidates(&self) -> StoreResult<Vec<CandidateRecord>>;

    fn job(&self, id: &JobId) -> StoreResult<Option<JobRecord>>;

    /// All jobs, insertion order.
    fn jobs(&self) -> StoreResult<Vec<JobRecord>>;

    fn application(
        &self,
        job_id: &JobId,
        candidate: &WalletAddress,
    ) -> StoreResult<Option<ApplicationRecord>>;

    /// All applications, insertion order.
    fn applications(&self) -> StoreResult<Vec<ApplicationRecord>>;

    /// The designated verifier, configured or defaulted.
    fn verifier(&self) -> StoreResult<WalletAddress>;

    /// Configure the verifier identity. Settable once per deployment;
    /// fails with [`StoreError::AlreadyConfigured`] on a second call.
    ///
    /// [`StoreError::AlreadyConfigured`]: crate::StoreError::AlreadyConfigured
    fn set_verifier(&self, address: WalletAddress) -> StoreResult<()>;

    /// Single-record upsert convenience; still routed through [`commit`].
    ///
    /// [`commit`]: ReferralStore::commit
    fn put_candidate(&self, record: CandidateRecord) -> StoreResult<()> {
        self.commit(WriteBatch::new().with_candidate(record))
    }

    fn put_job(&self, record: JobRecord) -> StoreResult<()> {
        self.commit(WriteBatch::new().with_job(record))
    }

    fn put_application(&self, record: ApplicationRecord) -> StoreResult<()> {
        self.commit(WriteBatch::new().with_application(record))
    }

    fn applications_for_job(&self, job_id: &JobId) -> StoreResult<Vec<ApplicationRecord>> {
        Ok(self
            .applications()?
            .into_iter()
            .filter(|a| &a.job_id == job_id)
            .collect())
    }

    fn applications_for_candidate(
        &self,
        candidate: &WalletAddress,
    ) -> StoreResult<Vec<ApplicationRecord>> {
        Ok(self
            .applications()?
            .into_iter()
            .filter(|a| &a.candidate == candidate)
            .collect())
    }
}
