//! The signing/submission gateway.
//!
//! `perform` is the sole suspension point of the system: validation happens
//! before it, persistence strictly after it, and only on a confirmed
//! receipt.

use crate::GatewayError;
use async_trait::async_trait;
use chainrefer_types::{ActionKind, TxReceipt};
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::{info, warn};

/// Wraps the external wallet-signing and chain-submission operation,
/// normalized to a [`TxReceipt`].
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    /// Sign and submit one action. Resolves once the chain has confirmed
    /// or rejected the transaction; there is no timeout, matching the
    /// experience of waiting for an external signature.
    async fn perform(
        &self,
        action: ActionKind,
        payload: serde_json::Value,
    ) -> Result<TxReceipt, GatewayError>;
}

/// Human-followable audit link for a confirmed transaction reference.
pub fn explorer_url(reference: &str) -> String {
    format!("https://explorer.aptoslabs.com/txn/{reference}?network=devnet")
}

/// Deterministic in-process gateway for tests and local runs.
///
/// Confirms every action by default with a freshly minted reference.
/// Failures can be scripted ahead of time to exercise the callers'
/// abort paths.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    failures: Mutex<VecDeque<GatewayError>>,
    performed: Mutex<Vec<(ActionKind, serde_json::Value)>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for the next `perform` call.
    pub fn fail_next(&self, error: GatewayError) {
        self.failures
            .lock()
            .expect("failure queue lock")
            .push_back(error);
    }

    /// Actions performed so far, in order.
    pub fn performed(&self) -> Vec<(ActionKind, serde_json::Value)> {
        self.performed.lock().expect("performed log lock").clone()
    }

    fn mint_reference() -> String {
        format!("0x{}", uuid::Uuid::new_v4().simple())
    }
}

#[async_trait]
impl TransactionGateway for ScriptedGateway {
    async fn perform(
        &self,
        action: ActionKind,
        payload: serde_json::Value,
    ) -> Result<TxReceipt, GatewayError> {
        let scripted = self
            .failures
            .lock()
            .map_err(|_| GatewayError::Unavailable("failure queue lock poisoned".to_string()))?
            .pop_front();
        if let Some(error) = scripted {
            warn!(action = %action, error = %error, "scripted gateway failure");
            return Err(error);
        }

        self.performed
            .lock()
            .map_err(|_| GatewayError::Unavailable("performed log lock poisoned".to_string()))?
            .push((action, payload));

        let receipt = TxReceipt::confirmed(Self::mint_reference());
        info!(action = %action, reference = %receipt.reference, "transaction confirmed");
        Ok(receipt)
    }
}
