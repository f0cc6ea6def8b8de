//! Record types for the three collections
//!
//! Candidates are keyed by wallet address, jobs by [`JobId`], applications by
//! the `(JobId, WalletAddress)` pair. All vectors that carry addresses have
//! set semantics with insertion order preserved.

use crate::identity::{JobId, WalletAddress};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The role an identity holds. At most one of the assigned roles per
/// identity, permanently, for the lifetime of the deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Candidate,
    Verifier,
    Referrer,
    Unassigned,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Candidate => "candidate",
            Role::Verifier => "verifier",
            Role::Referrer => "referrer",
            Role::Unassigned => "unassigned",
        };
        write!(f, "{name}")
    }
}

/// Verification status of a submitted resume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeStatus {
    Unverified,
    Verified,
    Rejected,
}

impl ResumeStatus {
    /// Verified and Rejected never transition again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResumeStatus::Unverified)
    }
}

/// Status of a job application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Shortlisted,
    Referred,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Referred | ApplicationStatus::Rejected)
    }

    /// Legal successors. Referral straight from Pending is intentional;
    /// shortlisting is an optional stage.
    pub fn can_advance_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Pending, Shortlisted) | (Pending, Referred) | (Pending, Rejected)
                | (Shortlisted, Referred)
                | (Shortlisted, Rejected)
        )
    }
}

/// Employment category of a posting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobCategory {
    FullTime,
    PartTime,
    Internship,
    Contract,
}

/// Candidate profile fields. Frozen once a resume digest is attached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub institution: String,
    pub department: String,
    pub graduation_year: u16,
}

/// A candidate's system-of-record entry. Created on first resume
/// submission, never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub address: WalletAddress,
    pub profile: CandidateProfile,
    /// Content digest of the uploaded resume. Set at most once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_digest: Option<String>,
    /// Content id of the pinned resume artifact, when pinned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_cid: Option<String>,
    pub status: ResumeStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<WalletAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    /// Jobs this candidate applied to, insertion order.
    pub applied_jobs: Vec<JobId>,
    /// Confirmed transaction references, oldest first.
    pub references: Vec<String>,
}

impl CandidateRecord {
    /// A candidate with a digest attached is permanently a candidate.
    pub fn has_submitted_resume(&self) -> bool {
        self.resume_digest.is_some()
    }

    /// Record an application, preserving set semantics.
    pub fn note_applied(&mut self, job_id: JobId) {
        if !self.applied_jobs.contains(&job_id) {
            self.applied_jobs.push(job_id);
        }
    }

    /// Append a confirmed transaction reference to the audit trail.
    pub fn push_reference(&mut self, reference: impl Into<String>) {
        self.references.push(reference.into());
    }
}

/// A job posting. The owner is fixed for life; the three address lists
/// grow monotonically and shortlisted/referred stay subsets of applicants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: JobCategory,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_by: WalletAddress,
    pub posted_by_name: String,
    pub posted_at: DateTime<Utc>,
    pub applicants: Vec<WalletAddress>,
    pub shortlisted: Vec<WalletAddress>,
    pub referred: Vec<WalletAddress>,
    /// Confirmed transaction references, oldest first.
    pub references: Vec<String>,
}

impl JobRecord {
    pub fn is_owned_by(&self, address: &WalletAddress) -> bool {
        &self.posted_by == address
    }

    pub fn has_applicant(&self, address: &WalletAddress) -> bool {
        self.applicants.contains(address)
    }

    pub fn add_applicant(&mut self, address: WalletAddress) {
        if !self.applicants.contains(&address) {
            self.applicants.push(address);
        }
    }

    /// Only existing applicants can be shortlisted.
    pub fn add_shortlisted(&mut self, address: WalletAddress) {
        if self.applicants.contains(&address) && !self.shortlisted.contains(&address) {
            self.shortlisted.push(address);
        }
    }

    /// Only existing applicants can be referred.
    pub fn add_referred(&mut self, address: WalletAddress) {
        if self.applicants.contains(&address) && !self.referred.contains(&address) {
            self.referred.push(address);
        }
    }

    pub fn push_reference(&mut self, reference: impl Into<String>) {
        self.references.push(reference.into());
    }
}

/// One application per `(job, candidate)` pair; upsert-by-key, never
/// duplicated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub job_id: JobId,
    pub candidate: WalletAddress,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    /// Reference of the confirmed transaction that created or last moved
    /// this application.
    pub reference: String,
}

impl ApplicationRecord {
    pub fn key(&self) -> (JobId, WalletAddress) {
        (self.job_id.clone(), self.candidate.clone())
    }
}
