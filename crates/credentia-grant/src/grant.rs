//! # Access-Grant Lifecycle
//!
//! Models the lifecycle of a company's request for access to a student's
//! certificates, from submission through approval, denial, or revocation.
//!
//! ## States
//!
//! ```text
//! Pending ──▶ Approved ──▶ Revoked (terminal)
//!    │
//!    └──▶ Denied (terminal)
//! ```
//!
//! ## Visibility Rule
//!
//! A company may view a student's certificate list if and only if a grant
//! for that exact (company, student) pair currently has status `Approved`.
//! Revocation removes visibility for future reads immediately; it does not
//! invalidate data a company's client has already fetched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use credentia_core::{CompanyId, GrantId, Principal, StudentId, StudentRecord};

// ─── Grant Status ────────────────────────────────────────────────────

/// The lifecycle state of an access grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    /// Request submitted, awaiting the student's decision.
    Pending,
    /// The student approved; the company can view certificates.
    Approved,
    /// The student denied the request (terminal).
    Denied,
    /// The student revoked a previously approved grant (terminal).
    Revoked,
}

impl GrantStatus {
    /// Whether this state is terminal. No transitions are defined out of
    /// `Denied` or `Revoked`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Denied | Self::Revoked)
    }

    /// Whether this state confers certificate visibility on the company.
    ///
    /// This is the single decision point for the visibility rule: exactly
    /// `Approved` grants visibility. `Denied` and `Revoked` differ only in
    /// why access is unavailable, never in behavior.
    pub fn grants_visibility(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Display priority tier: `Pending` first, `Approved` next,
    /// `Denied`/`Revoked` last. A read-path presentation policy, not a
    /// correctness invariant.
    pub fn display_rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Approved => 1,
            Self::Denied | Self::Revoked => 2,
        }
    }
}

impl std::fmt::Display for GrantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Denied => "DENIED",
            Self::Revoked => "REVOKED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by access-grant transitions.
#[derive(Error, Debug)]
pub enum GrantError {
    /// Attempted transition is not valid from the current state.
    #[error("invalid grant transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: String,
        /// Attempted target state.
        to: String,
    },

    /// Grant is in a terminal state.
    #[error("grant is in terminal state {state}")]
    TerminalState {
        /// The terminal state.
        state: String,
    },
}

// ─── AccessGrant ─────────────────────────────────────────────────────

/// The record mediating whether a company may view a given student's
/// certificates.
///
/// Company and student contact fields are denormalized onto the grant at
/// request time so either side's dashboard can render the other party
/// without a join; the referenced records are immutable, so the copies
/// cannot go stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Stable grant identifier.
    pub id: GrantId,
    /// The requesting company.
    pub company_id: CompanyId,
    /// Company display name at request time.
    pub company_name: String,
    /// Company contact email at request time.
    pub company_email: String,
    /// The student whose certificates are requested.
    pub student_id: StudentId,
    /// Student name at request time.
    pub student_name: String,
    /// Student email at request time.
    pub student_email: String,
    /// When the company submitted the request.
    pub request_date: DateTime<Utc>,
    /// When the student approved or denied, if they have.
    pub response_date: Option<DateTime<Utc>>,
    /// When the student revoked an approved grant, if they have.
    pub revoked_date: Option<DateTime<Utc>>,
    /// Optional message from the company to the student.
    pub message: Option<String>,
    /// Current lifecycle state.
    pub status: GrantStatus,
}

impl AccessGrant {
    /// Create a new pending grant: the company's request for access to a
    /// student's certificates.
    ///
    /// `request_date` is set to now. Whether a pending grant already
    /// exists for this (company, student) pair is the storage layer's
    /// concern — its insert refuses duplicates atomically.
    pub fn request(
        company: &Principal,
        company_name: impl Into<String>,
        student: &StudentRecord,
        message: Option<String>,
    ) -> Self {
        Self {
            id: GrantId::new(),
            company_id: CompanyId(company.id.0),
            company_name: company_name.into(),
            company_email: company.email.clone(),
            student_id: student.id,
            student_name: student.name.clone(),
            student_email: student.email.clone(),
            request_date: Utc::now(),
            response_date: None,
            revoked_date: None,
            message,
            status: GrantStatus::Pending,
        }
    }

    /// Student approves the request (PENDING → APPROVED).
    ///
    /// Sets `response_date` to now.
    pub fn approve(&mut self) -> Result<(), GrantError> {
        self.require_state(GrantStatus::Pending, "APPROVED")?;
        self.status = GrantStatus::Approved;
        self.response_date = Some(Utc::now());
        Ok(())
    }

    /// Student denies the request (PENDING → DENIED, terminal).
    ///
    /// Sets `response_date` to now.
    pub fn deny(&mut self) -> Result<(), GrantError> {
        self.require_state(GrantStatus::Pending, "DENIED")?;
        self.status = GrantStatus::Denied;
        self.response_date = Some(Utc::now());
        Ok(())
    }

    /// Student revokes a previously approved grant (APPROVED → REVOKED,
    /// terminal).
    ///
    /// Sets `revoked_date` to now. Removes visibility for all future
    /// reads; certificates themselves are untouched.
    pub fn revoke(&mut self) -> Result<(), GrantError> {
        self.require_state(GrantStatus::Approved, "REVOKED")?;
        self.status = GrantStatus::Revoked;
        self.revoked_date = Some(Utc::now());
        Ok(())
    }

    /// Whether this grant currently confers certificate visibility.
    pub fn grants_visibility(&self) -> bool {
        self.status.grants_visibility()
    }

    /// Reject the transition unless the grant is in `expected`, with a
    /// terminal-state error when the grant can never leave its state.
    fn require_state(&self, expected: GrantStatus, to: &str) -> Result<(), GrantError> {
        if self.status == expected {
            return Ok(());
        }
        if self.status.is_terminal() {
            return Err(GrantError::TerminalState {
                state: self.status.to_string(),
            });
        }
        Err(GrantError::InvalidTransition {
            from: self.status.to_string(),
            to: to.to_string(),
        })
    }
}

// ─── Display ordering ────────────────────────────────────────────────

/// Sort grants for presentation: `Pending` first, `Approved` next,
/// `Denied`/`Revoked` last; within a tier, most recent `request_date`
/// first.
pub fn sort_for_display(grants: &mut [AccessGrant]) {
    grants.sort_by(|a, b| {
        a.status
            .display_rank()
            .cmp(&b.status.display_rank())
            .then(b.request_date.cmp(&a.request_date))
    });
}
