//! The referral orchestrator.
//!
//! Sequences every mutating operation the same way: validate against a
//! read snapshot, suspend on the transaction gateway, and only on a
//! confirmed receipt commit every touched record as one batch. A gateway
//! failure aborts the attempt with the store untouched; re-issuing the
//! same action re-validates from scratch, so retries are always safe.

use crate::{ApplicationLifecycle, ReferralError, ReferralResult, ResumeLifecycle, RoleGate};
use chainrefer_gateway::TransactionGateway;
use chainrefer_store::{ReferralStore, WriteBatch};
use chainrefer_types::{
    ActionKind, ApplicationRecord, ApplicationStatus, CandidateProfile, CandidateRecord,
    JobCategory, JobId, JobRecord, ResumeStatus, Role, TxReceipt, WalletAddress,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Fields a referrer supplies when posting a job. The id is the poster's
/// to assign; a fresh one is minted when omitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: JobCategory,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_by_name: String,
}

/// An application joined with its candidate record, for owner-side review.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobApplicant {
    pub application: ApplicationRecord,
    pub candidate: Option<CandidateRecord>,
}

/// Composition root for the referral workflow. Store and gateway are
/// injected; there are no ambient singletons.
pub struct ReferralService {
    store: Arc<dyn ReferralStore>,
    gateway: Arc<dyn TransactionGateway>,
}

impl ReferralService {
    pub fn new(store: Arc<dyn ReferralStore>, gateway: Arc<dyn TransactionGateway>) -> Self {
        Self { store, gateway }
    }

    // ── Mutating operations ──────────────────────────────────────────

    /// Submit a resume digest, creating the candidate record in
    /// `Unverified`. One submission per identity, ever.
    pub async fn submit_resume(
        &self,
        identity: WalletAddress,
        profile: CandidateProfile,
        digest: String,
        resume_cid: Option<String>,
    ) -> ReferralResult<CandidateRecord> {
        RoleGate::require(self.store.as_ref(), &identity, Role::Candidate)?;
        let existing = self.store.candidate(&identity)?;
        ResumeLifecycle::validate_submit(existing.as_ref())?;

        let payload = json!({
            "wallet": identity,
            "digest": digest,
            "name": profile.name,
        });
        let receipt = self.perform(ActionKind::SubmitResume, payload).await?;

        let record = CandidateRecord {
            address: identity,
            profile,
            resume_digest: Some(digest),
            resume_cid,
            status: ResumeStatus::Unverified,
            submitted_at: receipt.submitted_at,
            verified_by: None,
            verified_at: None,
            applied_jobs: vec![],
            references: vec![receipt.reference.clone()],
        };
        self.store
            .commit(WriteBatch::new().with_candidate(record.clone()))?;

        info!(
            candidate = %record.address.abbreviated(),
            reference = %receipt.reference,
            "resume submitted"
        );
        Ok(record)
    }

    /// Verifier approves or rejects a pending resume. Both outcomes are
    /// terminal.
    pub async fn decide_resume(
        &self,
        verifier: WalletAddress,
        candidate: WalletAddress,
        approve: bool,
    ) -> ReferralResult<CandidateRecord> {
        let decision = RoleGate::evaluate(self.store.as_ref(), &verifier, Role::Verifier)?;
        if !decision.allowed {
            warn!(caller = %verifier.abbreviated(), "resume decision by non-verifier");
            return Err(ReferralError::Unauthorized(
                "caller is not the designated verifier".to_string(),
            ));
        }

        let mut record = self
            .store
            .candidate(&candidate)?
            .ok_or_else(|| ReferralError::NotFound(format!("candidate {candidate}")))?;
        if record.status.is_terminal() {
            return Err(ReferralError::InvalidTransition {
                from: format!("{:?}", record.status),
                attempted: if approve { "Verified" } else { "Rejected" }.to_string(),
            });
        }

        let action = if approve {
            ActionKind::VerifyResume
        } else {
            ActionKind::RejectResume
        };
        let payload = json!({
            "verifier": verifier,
            "candidate": candidate,
            "digest": record.resume_digest,
            "approved": approve,
        });
        let receipt = self.perform(action, payload).await?;

        ResumeLifecycle::decide(&mut record, &verifier, approve, Utc::now())?;
        record.push_reference(receipt.reference.clone());
        self.store
            .commit(WriteBatch::new().with_candidate(record.clone()))?;

        info!(
            candidate = %record.address.abbreviated(),
            status = ?record.status,
            reference = %receipt.reference,
            "resume decided"
        );
        Ok(record)
    }

    /// Post a job, permanently marking the poster as a referrer.
    pub async fn post_job(
        &self,
        poster: WalletAddress,
        draft: JobDraft,
    ) -> ReferralResult<JobRecord> {
        RoleGate::require(self.store.as_ref(), &poster, Role::Referrer)?;

        let id = draft.id.clone().unwrap_or_else(JobId::generate);
        if self.store.job(&id)?.is_some() {
            return Err(ReferralError::DuplicateSubmission(format!("job {id}")));
        }

        let payload = json!({
            "job_id": id,
            "title": draft.title,
            "company": draft.company,
        });
        let receipt = self.perform(ActionKind::CreateJob, payload).await?;

        let record = JobRecord {
            id,
            title: draft.title,
            company: draft.company,
            location: draft.location,
            category: draft.category,
            description: draft.description,
            requirements: draft.requirements,
            posted_by: poster,
            posted_by_name: draft.posted_by_name,
            posted_at: receipt.submitted_at,
            applicants: vec![],
            shortlisted: vec![],
            referred: vec![],
            references: vec![receipt.reference.clone()],
        };
        self.store.commit(WriteBatch::new().with_job(record.clone()))?;

        info!(job = %record.id, reference = %receipt.reference, "job posted");
        Ok(record)
    }

    /// Apply to a job. Requires a verified resume; one application per
    /// `(job, candidate)` pair.
    pub async fn apply_to_job(
        &self,
        identity: WalletAddress,
        job_id: JobId,
    ) -> ReferralResult<ApplicationRecord> {
        let mut candidate = self
            .store
            .candidate(&identity)?
            .ok_or_else(|| ReferralError::NotFound(format!("candidate {identity}")))?;
        let mut job = self
            .store
            .job(&job_id)?
            .ok_or_else(|| ReferralError::NotFound(format!("job {job_id}")))?;
        let existing = self.store.application(&job_id, &identity)?;
        ApplicationLifecycle::validate_apply(&candidate, existing.as_ref())?;

        let payload = json!({
            "job_id": job_id,
            "wallet": identity,
            "digest": candidate.resume_digest,
        });
        let receipt = self.perform(ActionKind::ApplyJob, payload).await?;

        let application = ApplicationRecord {
            job_id: job_id.clone(),
            candidate: identity.clone(),
            status: ApplicationStatus::Pending,
            applied_at: receipt.submitted_at,
            reference: receipt.reference.clone(),
        };
        job.add_applicant(identity);
        candidate.note_applied(job_id);
        candidate.push_reference(receipt.reference.clone());

        self.store.commit(
            WriteBatch::new()
                .with_candidate(candidate)
                .with_job(job)
                .with_application(application.clone()),
        )?;

        info!(
            job = %application.job_id,
            candidate = %application.candidate.abbreviated(),
            reference = %receipt.reference,
            "application created"
        );
        Ok(application)
    }

    /// Owner shortlists a pending applicant.
    pub async fn shortlist(
        &self,
        owner: WalletAddress,
        job_id: JobId,
        candidate: WalletAddress,
    ) -> ReferralResult<ApplicationRecord> {
        self.advance_application(
            owner,
            job_id,
            candidate,
            ApplicationStatus::Shortlisted,
            ActionKind::ShortlistCandidate,
        )
        .await
    }

    /// Owner refers an applicant, from Pending or Shortlisted.
    pub async fn refer(
        &self,
        owner: WalletAddress,
        job_id: JobId,
        candidate: WalletAddress,
    ) -> ReferralResult<ApplicationRecord> {
        self.advance_application(
            owner,
            job_id,
            candidate,
            ApplicationStatus::Referred,
            ActionKind::ReferCandidate,
        )
        .await
    }

    /// Owner rejects an applicant, from Pending or Shortlisted.
    pub async fn reject_application(
        &self,
        owner: WalletAddress,
        job_id: JobId,
        candidate: WalletAddress,
    ) -> ReferralResult<ApplicationRecord> {
        self.advance_application(
            owner,
            job_id,
            candidate,
            ApplicationStatus::Rejected,
            ActionKind::RejectCandidate,
        )
        .await
    }

    /// Configure the designated verifier (once per deployment).
    pub fn set_verifier(&self, address: WalletAddress) -> ReferralResult<()> {
        self.store.set_verifier(address)?;
        Ok(())
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn candidate(&self, address: &WalletAddress) -> ReferralResult<Option<CandidateRecord>> {
        Ok(self.store.candidate(address)?)
    }

    pub fn job(&self, id: &JobId) -> ReferralResult<Option<JobRecord>> {
        Ok(self.store.job(id)?)
    }

    pub fn jobs(&self) -> ReferralResult<Vec<JobRecord>> {
        Ok(self.store.jobs()?)
    }

    /// Candidates with a verified resume, the pool referrers draw from.
    pub fn verified_candidates(&self) -> ReferralResult<Vec<CandidateRecord>> {
        Ok(self
            .store
            .candidates()?
            .into_iter()
            .filter(|record| record.status == ResumeStatus::Verified)
            .collect())
    }

    /// Applications for a job, joined with their candidate records.
    pub fn applicants_for_job(&self, job_id: &JobId) -> ReferralResult<Vec<JobApplicant>> {
        let applications = self.store.applications_for_job(job_id)?;
        let mut joined = Vec::with_capacity(applications.len());
        for application in applications {
            let candidate = self.store.candidate(&application.candidate)?;
            joined.push(JobApplicant {
                application,
                candidate,
            });
        }
        Ok(joined)
    }

    pub fn applications_for_candidate(
        &self,
        candidate: &WalletAddress,
    ) -> ReferralResult<Vec<ApplicationRecord>> {
        Ok(self.store.applications_for_candidate(candidate)?)
    }

    /// The role an identity currently holds.
    pub fn role_of(&self, identity: &WalletAddress) -> ReferralResult<Role> {
        RoleGate::current_role(self.store.as_ref(), identity)
    }

    pub fn verifier(&self) -> ReferralResult<WalletAddress> {
        Ok(self.store.verifier()?)
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Shared path for the three owner-driven application transitions.
    async fn advance_application(
        &self,
        owner: WalletAddress,
        job_id: JobId,
        candidate: WalletAddress,
        next: ApplicationStatus,
        action: ActionKind,
    ) -> ReferralResult<ApplicationRecord> {
        let mut job = self
            .store
            .job(&job_id)?
            .ok_or_else(|| ReferralError::NotFound(format!("job {job_id}")))?;
        let mut application = self
            .store
            .application(&job_id, &candidate)?
            .ok_or_else(|| {
                ReferralError::NotFound(format!("application ({job_id}, {candidate})"))
            })?;

        // Full validation before the gateway: a doomed action must never
        // reach the signer.
        if !job.is_owned_by(&owner) {
            return Err(ReferralError::Unauthorized(format!(
                "{} does not own job {}",
                owner.abbreviated(),
                job.id
            )));
        }
        if !application.status.can_advance_to(next) {
            return Err(ReferralError::InvalidTransition {
                from: format!("{:?}", application.status),
                attempted: format!("{next:?}"),
            });
        }

        let payload = json!({
            "job_id": job_id,
            "candidate": candidate,
        });
        let receipt = self.perform(action, payload).await?;

        ApplicationLifecycle::advance(&mut application, &job, &owner, next)?;
        application.reference = receipt.reference.clone();
        match next {
            ApplicationStatus::Shortlisted => job.add_shortlisted(candidate),
            ApplicationStatus::Referred => job.add_referred(candidate),
            ApplicationStatus::Pending | ApplicationStatus::Rejected => {}
        }
        job.push_reference(receipt.reference.clone());

        self.store.commit(
            WriteBatch::new()
                .with_job(job)
                .with_application(application.clone()),
        )?;

        info!(
            job = %application.job_id,
            candidate = %application.candidate.abbreviated(),
            status = ?application.status,
            reference = %receipt.reference,
            "application advanced"
        );
        Ok(application)
    }

    /// Suspend on the gateway and insist on a confirmed receipt.
    async fn perform(
        &self,
        action: ActionKind,
        payload: serde_json::Value,
    ) -> ReferralResult<TxReceipt> {
        let receipt = self.gateway.perform(action, payload).await?;
        if !receipt.confirmed {
            warn!(action = %action, reference = %receipt.reference, "unconfirmed receipt");
            return Err(ReferralError::SubmissionFailed(format!(
                "transaction {} reported unconfirmed",
                receipt.reference
            )));
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainrefer_gateway::ScriptedGateway;
    use chainrefer_store::MemoryStore;

    fn profile() -> CandidateProfile {
        CandidateProfile {
            name: "Ada".to_string(),
            email: "ada@example.edu".to_string(),
            institution: "State University".to_string(),
            department: "CS".to_string(),
            graduation_year: 2025,
        }
    }

    fn draft() -> JobDraft {
        JobDraft {
            id: None,
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            category: JobCategory::FullTime,
            description: "Rust services".to_string(),
            requirements: vec!["rust".to_string()],
            posted_by_name: "Owner".to_string(),
        }
    }

    fn service() -> (ReferralService, Arc<ScriptedGateway>) {
        let gateway = Arc::new(ScriptedGateway::new());
        let store = Arc::new(MemoryStore::new());
        (ReferralService::new(store, gateway.clone()), gateway)
    }

    #[tokio::test]
    async fn doomed_actions_never_reach_the_gateway() {
        let (service, gateway) = service();

        // No candidate record at all: applying is invalid before signing.
        let result = service
            .apply_to_job(WalletAddress::new("0xnobody"), JobId::new("job-1"))
            .await;
        assert!(matches!(result, Err(ReferralError::NotFound(_))));
        assert!(gateway.performed().is_empty());
    }

    #[tokio::test]
    async fn duplicate_resume_submission_fails_before_signing() {
        let (service, gateway) = service();
        let wallet = WalletAddress::new("0xcand");

        service
            .submit_resume(wallet.clone(), profile(), "d1".to_string(), None)
            .await
            .unwrap();
        assert_eq!(gateway.performed().len(), 1);

        let second = service
            .submit_resume(wallet, profile(), "d2".to_string(), None)
            .await;
        assert!(matches!(second, Err(ReferralError::DuplicateSubmission(_))));
        assert_eq!(gateway.performed().len(), 1);
    }

    #[tokio::test]
    async fn posting_a_job_marks_the_poster_as_referrer() {
        let (service, _) = service();
        let owner = WalletAddress::new("0xowner");

        let job = service.post_job(owner.clone(), draft()).await.unwrap();
        assert_eq!(job.references.len(), 1);
        assert_eq!(service.role_of(&owner).unwrap(), Role::Referrer);

        let as_candidate = service
            .submit_resume(owner, profile(), "d1".to_string(), None)
            .await;
        assert!(matches!(
            as_candidate,
            Err(ReferralError::RoleConflict(
                chainrefer_types::RoleDenial::AlreadyReferrer
            ))
        ));
    }

    #[tokio::test]
    async fn non_verifier_cannot_decide_resumes() {
        let (service, gateway) = service();
        let wallet = WalletAddress::new("0xcand");

        service
            .submit_resume(wallet.clone(), profile(), "d1".to_string(), None)
            .await
            .unwrap();

        let result = service
            .decide_resume(WalletAddress::new("0ximpostor"), wallet, true)
            .await;
        assert!(matches!(result, Err(ReferralError::Unauthorized(_))));
        assert_eq!(gateway.performed().len(), 1);
    }
}
