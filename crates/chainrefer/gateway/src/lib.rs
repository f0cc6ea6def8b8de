//! ChainRefer external boundaries.
//!
//! Everything the core must suspend on lives here:
//! - the transaction gateway (wallet signing + chain submission), the one
//!   async boundary of the whole system
//! - the resume vault (content-addressable pinning service)
//! - the digest primitive used to fingerprint resume bytes
//!
//! The core never sees wallet or pinning internals, only these contracts.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod error;
mod gateway;
#[cfg(feature = "remote")]
pub mod remote;
mod vault;

pub use error::{GatewayError, VaultError};
pub use gateway::{explorer_url, ScriptedGateway, TransactionGateway};
pub use vault::{resume_digest, MemoryVault, PinnedArtifact, ResumeVault};
