//! ChainRefer core - the role/state-machine and orchestration layer.
//!
//! Coordinates a three-role workflow (candidate, credential verifier,
//! referrer) around a single artifact (a resume) and a single transaction
//! (a job referral). Every state-changing operation follows one shape:
//!
//! 1. validate against a read snapshot of the store (no side effects)
//! 2. suspend on the transaction gateway
//! 3. on a confirmed receipt, commit every touched record as one batch
//! 4. on any gateway failure, surface the error; the store is untouched
//!
//! No lifecycle transition is ever applied speculatively.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod application;
mod error;
mod resume;
mod role;
mod service;

pub use application::ApplicationLifecycle;
pub use error::{ReferralError, ReferralResult};
pub use resume::ResumeLifecycle;
pub use role::{RoleDecision, RoleGate};
pub use service::{JobApplicant, JobDraft, ReferralService};
