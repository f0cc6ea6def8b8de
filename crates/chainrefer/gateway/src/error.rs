use thiserror::Error;

/// Transaction gateway failures. All of them leave the local store
/// untouched; the caller decides whether to re-issue the action.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The wallet holder declined to sign.
    #[error("signing rejected by wallet")]
    Rejected,

    /// No wallet/signer is reachable.
    #[error("signing unavailable: {0}")]
    Unavailable(String),

    /// The signed transaction was submitted but not accepted.
    #[error("transaction submission failed: {0}")]
    Submission(String),
}

/// Resume vault (pinning service) failures.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Transport or service-side failure while pinning/retrieving.
    #[error("vault transport error: {0}")]
    Transport(String),

    /// The pinning service refused the artifact.
    #[error("vault rejected artifact: {0}")]
    Rejected(String),
}
