//! ChainRefer local system of record.
//!
//! Three collections (candidates, jobs, applications) plus one
//! configuration value (the designated verifier). Pure data access; the
//! business rules live in `chainrefer-core`.
//!
//! Design stance:
//! - All writes flow through [`ReferralStore::commit`], which applies a
//!   whole [`WriteBatch`] as a unit. Records touched by one action are
//!   never persisted separately.
//! - Access is synchronous. The only async boundary in the system is the
//!   transaction gateway, and the store is only ever mutated after that
//!   boundary has resolved.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod error;
pub mod memory;
pub mod snapshot;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use snapshot::SnapshotStore;
pub use traits::{ReferralStore, WriteBatch, DEFAULT_VERIFIER};
