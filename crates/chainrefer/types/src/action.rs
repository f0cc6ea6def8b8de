//! Signed-action kinds and gateway receipts
//!
//! Every mutating operation corresponds to exactly one externally signed
//! action. The kind plus a JSON payload is what the transaction gateway
//! submits; the receipt is what the orchestrator commits against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The actions that require an external signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SubmitResume,
    VerifyResume,
    RejectResume,
    CreateJob,
    ApplyJob,
    ShortlistCandidate,
    ReferCandidate,
    RejectCandidate,
}

impl ActionKind {
    /// Wire tag used in submitted payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::SubmitResume => "submit_resume",
            ActionKind::VerifyResume => "verify_resume",
            ActionKind::RejectResume => "reject_resume",
            ActionKind::CreateJob => "create_job",
            ActionKind::ApplyJob => "apply_job",
            ActionKind::ShortlistCandidate => "shortlist_candidate",
            ActionKind::ReferCandidate => "refer_candidate",
            ActionKind::RejectCandidate => "reject_candidate",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized result of a signed, submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Stable reference, sufficient to build an audit link.
    pub reference: String,
    /// Whether the external chain reported success.
    pub confirmed: bool,
    pub submitted_at: DateTime<Utc>,
}

impl TxReceipt {
    pub fn confirmed(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            confirmed: true,
            submitted_at: Utc::now(),
        }
    }
}
