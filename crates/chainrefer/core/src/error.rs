use chainrefer_gateway::GatewayError;
use chainrefer_store::StoreError;
use chainrefer_types::RoleDenial;
use thiserror::Error;

/// Referral-core failures. All recoverable by the caller; none of them
/// leaves the store in a partial state.
#[derive(Debug, Error)]
pub enum ReferralError {
    /// Role assignment denied; carries the specific reason.
    #[error("role conflict: {0}")]
    RoleConflict(RoleDenial),

    /// Lifecycle precondition not met.
    #[error("invalid transition: {from} cannot move to {attempted}")]
    InvalidTransition { from: String, attempted: String },

    /// Caller lacks the required role or ownership.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resume or application already exists for the key.
    #[error("duplicate submission: {0}")]
    DuplicateSubmission(String),

    /// Referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The wallet holder declined to sign.
    #[error("signing rejected by wallet")]
    SigningRejected,

    /// No wallet/signer is reachable.
    #[error("signing unavailable: {0}")]
    SigningUnavailable(String),

    /// The transaction was submitted but not confirmed.
    #[error("transaction submission failed: {0}")]
    SubmissionFailed(String),

    /// Store-level failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<GatewayError> for ReferralError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Rejected => ReferralError::SigningRejected,
            GatewayError::Unavailable(reason) => ReferralError::SigningUnavailable(reason),
            GatewayError::Submission(reason) => ReferralError::SubmissionFailed(reason),
        }
    }
}

pub type ReferralResult<T> = Result<T, ReferralError>;
