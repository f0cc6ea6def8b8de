//! Job application lifecycle.
//!
//! `Pending -> {Shortlisted, Referred, Rejected}` and
//! `Shortlisted -> {Referred, Rejected}`. Referral straight from Pending
//! is intentional; shortlisting is an optional stage. Referred and
//! Rejected are terminal.

use crate::{ReferralError, ReferralResult};
use chainrefer_types::{
    ApplicationRecord, ApplicationStatus, CandidateRecord, JobRecord, ResumeStatus, WalletAddress,
};

pub struct ApplicationLifecycle;

impl ApplicationLifecycle {
    /// Applying requires a verified resume and no prior application for
    /// the `(job, candidate)` pair.
    pub fn validate_apply(
        candidate: &CandidateRecord,
        existing: Option<&ApplicationRecord>,
    ) -> ReferralResult<()> {
        if candidate.status != ResumeStatus::Verified {
            return Err(ReferralError::InvalidTransition {
                from: format!("{:?}", candidate.status),
                attempted: "Apply".to_string(),
            });
        }
        if let Some(application) = existing {
            return Err(ReferralError::DuplicateSubmission(format!(
                "application already exists for {} on {}",
                application.candidate, application.job_id
            )));
        }
        Ok(())
    }

    /// Move an application forward on behalf of the job owner. Ownership
    /// is checked before the transition itself.
    pub fn advance(
        application: &mut ApplicationRecord,
        job: &JobRecord,
        caller: &WalletAddress,
        next: ApplicationStatus,
    ) -> ReferralResult<()> {
        if !job.is_owned_by(caller) {
            return Err(ReferralError::Unauthorized(format!(
                "{} does not own job {}",
                caller.abbreviated(),
                job.id
            )));
        }
        if !application.status.can_advance_to(next) {
            return Err(ReferralError::InvalidTransition {
                from: format!("{:?}", application.status),
                attempted: format!("{next:?}"),
            });
        }

        application.status = next;
        Ok(())
    }
}
