//! Role-gate denial reasons
//!
//! Role assignment is a total, permanent partition: a denial always names
//! which side of the partition the identity already sits on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a role request was denied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleDenial {
    /// The identity has submitted a resume and is permanently a candidate.
    #[error("wallet is already registered as a candidate")]
    AlreadyCandidate,

    /// The identity has posted a job and is permanently a referrer.
    #[error("wallet is already registered as a referrer")]
    AlreadyReferrer,

    /// The identity is not the configured verifier.
    #[error("wallet is not authorized as a verifier")]
    NotAuthorizedVerifier,
}
