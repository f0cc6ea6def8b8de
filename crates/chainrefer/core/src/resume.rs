//! Resume verification lifecycle.
//!
//! `Unverified -> Verified` or `Unverified -> Rejected`, nothing else.
//! Both outcomes are terminal; re-review and re-submission are not
//! supported. The transition helpers here are pure: they validate and
//! mutate records in memory, and the orchestrator decides when (and
//! whether) the result is persisted.

use crate::{ReferralError, ReferralResult};
use chainrefer_types::{CandidateRecord, ResumeStatus, WalletAddress};
use chrono::{DateTime, Utc};

pub struct ResumeLifecycle;

impl ResumeLifecycle {
    /// A resume may be submitted only once per identity.
    pub fn validate_submit(existing: Option<&CandidateRecord>) -> ReferralResult<()> {
        match existing {
            Some(record) if record.has_submitted_resume() => Err(
                ReferralError::DuplicateSubmission(format!(
                    "resume already submitted for {}",
                    record.address
                )),
            ),
            _ => Ok(()),
        }
    }

    /// Apply the verifier's decision, stamping who decided and when.
    /// Legal only while the record is still `Unverified`.
    pub fn decide(
        record: &mut CandidateRecord,
        verifier: &WalletAddress,
        approve: bool,
        decided_at: DateTime<Utc>,
    ) -> ReferralResult<()> {
        if record.status.is_terminal() {
            return Err(ReferralError::InvalidTransition {
                from: format!("{:?}", record.status),
                attempted: if approve { "Verified" } else { "Rejected" }.to_string(),
            });
        }

        record.status = if approve {
            ResumeStatus::Verified
        } else {
            ResumeStatus::Rejected
        };
        record.verified_by = Some(verifier.clone());
        record.verified_at = Some(decided_at);
        Ok(())
    }
}
