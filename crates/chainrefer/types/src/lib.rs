//! ChainRefer Type System
//!
//! Shared vocabulary for the referral core: wallet identities, candidate /
//! job / application records, the signed-action kinds, and the error
//! taxonomy every layer speaks.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod action;
mod errors;
mod identity;
mod records;

pub use action::*;
pub use errors::*;
pub use identity::*;
pub use records::*;

/// Schema version for serialized records
pub const SCHEMA_VERSION: &str = "1.0.0";
