//! Role gate - the system's central invariant.
//!
//! Identities partition permanently into at most one of candidate,
//! verifier, referrer. Submitting a resume makes a wallet a candidate for
//! life; posting a job makes it a referrer for life; the verifier is a
//! single configured identity. Re-requesting a role already legitimately
//! held is always allowed.

use crate::{ReferralError, ReferralResult};
use chainrefer_store::ReferralStore;
use chainrefer_types::{Role, RoleDenial, WalletAddress};

/// Outcome of a role evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleDecision {
    pub allowed: bool,
    pub reason: Option<RoleDenial>,
}

impl RoleDecision {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn denied(reason: RoleDenial) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Decides whether an identity may adopt a requested role.
pub struct RoleGate;

impl RoleGate {
    /// Evaluate a role request against the store's current records.
    /// Rule order matters: candidacy is checked before referrer history,
    /// and the verifier identity check comes last.
    pub fn evaluate(
        store: &dyn ReferralStore,
        identity: &WalletAddress,
        requested: Role,
    ) -> ReferralResult<RoleDecision> {
        let is_candidate = store
            .candidate(identity)?
            .map(|record| record.has_submitted_resume())
            .unwrap_or(false);
        if is_candidate && matches!(requested, Role::Verifier | Role::Referrer) {
            return Ok(RoleDecision::denied(RoleDenial::AlreadyCandidate));
        }

        let has_posted = Self::has_posted_job(store, identity)?;
        if has_posted && matches!(requested, Role::Candidate | Role::Verifier) {
            return Ok(RoleDecision::denied(RoleDenial::AlreadyReferrer));
        }

        if requested == Role::Verifier && store.verifier()? != *identity {
            return Ok(RoleDecision::denied(RoleDenial::NotAuthorizedVerifier));
        }

        Ok(RoleDecision::allowed())
    }

    /// Evaluate and convert a denial into the error taxonomy.
    pub fn require(
        store: &dyn ReferralStore,
        identity: &WalletAddress,
        requested: Role,
    ) -> ReferralResult<()> {
        let decision = Self::evaluate(store, identity, requested)?;
        match decision.reason {
            None => Ok(()),
            Some(reason) => Err(ReferralError::RoleConflict(reason)),
        }
    }

    /// The role an identity currently holds, for exhaustive dispatch.
    pub fn current_role(
        store: &dyn ReferralStore,
        identity: &WalletAddress,
    ) -> ReferralResult<Role> {
        let is_candidate = store
            .candidate(identity)?
            .map(|record| record.has_submitted_resume())
            .unwrap_or(false);
        if is_candidate {
            return Ok(Role::Candidate);
        }
        if Self::has_posted_job(store, identity)? {
            return Ok(Role::Referrer);
        }
        if store.verifier()? == *identity {
            return Ok(Role::Verifier);
        }
        Ok(Role::Unassigned)
    }

    fn has_posted_job(store: &dyn ReferralStore, identity: &WalletAddress) -> ReferralResult<bool> {
        Ok(store.jobs()?.iter().any(|job| job.is_owned_by(identity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainrefer_store::MemoryStore;
    use chainrefer_types::{CandidateProfile, CandidateRecord, JobCategory, JobId, JobRecord, ResumeStatus};
    use chrono::Utc;

    fn store_with_candidate(address: &str) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .put_candidate(CandidateRecord {
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
            })
            .unwrap();
        store
    }

    fn store_with_job(owner: &str) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .put_job(JobRecord {
                id: JobId::new("job-1"),
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                category: JobCategory::FullTime,
                description: String::new(),
                requirements: vec![],
                posted_by: WalletAddress::new(owner),
                posted_by_name: "Owner".to_string(),
                posted_at: Utc::now(),
                applicants: vec![],
                shortlisted: vec![],
                referred: vec![],
                references: vec![],
            })
            .unwrap();
        store
    }

    #[test]
    fn candidate_cannot_become_referrer_or_verifier() {
        let store = store_with_candidate("0xcand");
        let wallet = WalletAddress::new("0xcand");

        let as_referrer = RoleGate::evaluate(&store, &wallet, Role::Referrer).unwrap();
        assert_eq!(as_referrer.reason, Some(RoleDenial::AlreadyCandidate));

        let as_verifier = RoleGate::evaluate(&store, &wallet, Role::Verifier).unwrap();
        assert_eq!(as_verifier.reason, Some(RoleDenial::AlreadyCandidate));

        // Idempotent re-request of the held role.
        let as_candidate = RoleGate::evaluate(&store, &wallet, Role::Candidate).unwrap();
        assert!(as_candidate.allowed);
    }

    #[test]
    fn job_poster_is_permanently_a_referrer() {
        let store = store_with_job("0xowner");
        let wallet = WalletAddress::new("0xowner");

        let as_candidate = RoleGate::evaluate(&store, &wallet, Role::Candidate).unwrap();
        assert_eq!(as_candidate.reason, Some(RoleDenial::AlreadyReferrer));

        let as_referrer = RoleGate::evaluate(&store, &wallet, Role::Referrer).unwrap();
        assert!(as_referrer.allowed);

        assert_eq!(
            RoleGate::current_role(&store, &wallet).unwrap(),
            Role::Referrer
        );
    }

    #[test]
    fn verifier_role_requires_configured_identity() {
        let store = MemoryStore::new();
        store.set_verifier(WalletAddress::new("0xv")).unwrap();

        let stranger = RoleGate::evaluate(&store, &WalletAddress::new("0xother"), Role::Verifier)
            .unwrap();
        assert_eq!(stranger.reason, Some(RoleDenial::NotAuthorizedVerifier));

        let configured =
            RoleGate::evaluate(&store, &WalletAddress::new("0xV"), Role::Verifier).unwrap();
        assert!(configured.allowed);
    }

    #[test]
    fn fresh_identity_is_unassigned_and_unrestricted() {
        let store = MemoryStore::new();
        let wallet = WalletAddress::new("0xnew");

        assert_eq!(
            RoleGate::current_role(&store, &wallet).unwrap(),
            Role::Unassigned
        );
        assert!(RoleGate::evaluate(&store, &wallet, Role::Candidate)
            .unwrap()
            .allowed);
        assert!(RoleGate::evaluate(&store, &wallet, Role::Referrer)
            .unwrap()
            .allowed);
    }
}
