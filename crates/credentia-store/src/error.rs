//! # Storage Errors

use thiserror::Error;

use credentia_core::{CertificateId, CompanyId, GrantId, StudentId};
use credentia_grant::GrantError;

/// Errors raised by the document and blob stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A principal with this email already exists (duplicate registration).
    #[error("a principal with email {0:?} already exists")]
    EmailTaken(String),

    /// A student record with this enrollment email already exists. The
    /// principal-to-record link resolves by email, so it must be unique
    /// across student records.
    #[error("a student record with email {0:?} already exists")]
    StudentEmailTaken(String),

    /// No student record with this identifier.
    #[error("student {0} not found")]
    StudentNotFound(StudentId),

    /// No certificate record with this identifier.
    #[error("certificate {0} not found")]
    CertificateNotFound(CertificateId),

    /// No access grant with this identifier.
    #[error("grant {0} not found")]
    GrantNotFound(GrantId),

    /// The pending-grant uniqueness constraint refused an insert: a
    /// pending grant already exists for this (company, student) pair.
    #[error("a pending access request already exists for company {company_id} and student {student_id}")]
    PendingGrantExists {
        /// The requesting company.
        company_id: CompanyId,
        /// The requested student.
        student_id: StudentId,
    },

    /// A grant transition was rejected by the state machine.
    #[error(transparent)]
    Transition(#[from] GrantError),

    /// A blob location string was malformed or escaped the store root.
    #[error("invalid blob location: {0}")]
    InvalidLocation(String),

    /// No blob stored at this location.
    #[error("no blob stored at {0:?}")]
    BlobMissing(String),

    /// Filesystem error in the blob store.
    #[error("blob io error: {0}")]
    Io(#[from] std::io::Error),
}
