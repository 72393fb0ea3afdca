//! # Domain Records — Student Records and Certificates
//!
//! The immutable records of the system. Each is an independently stored
//! document; ownership lives in the document store, not in any in-process
//! object graph.
//!
//! Neither record type exposes a mutating method: a `StudentRecord` is
//! never changed after enrollment, and a `Certificate` has no update or
//! delete path. The one entity with a lifecycle — the access grant — lives
//! in `credentia-grant`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::ContentDigest;
use crate::identity::{CertificateId, SchoolId, StudentId};

/// A student enrolled by a school.
///
/// Created by the enrolling school and scoped to it: `owner_school_id`
/// never changes. Referenced by certificates and access grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Stable record identifier.
    pub id: StudentId,
    /// Full name.
    pub name: String,
    /// Contact email. Also the link to the student's principal: a student
    /// signing up with this address sees this record's certificates.
    pub email: String,
    /// The school's own student number (registrar-assigned, opaque here).
    pub external_student_id: String,
    /// Program of study.
    pub program: String,
    /// Year of enrollment.
    pub enrollment_year: u16,
    /// The school that enrolled this student. Never changes.
    pub owner_school_id: SchoolId,
}

impl StudentRecord {
    /// Create a new student record scoped to the enrolling school.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        external_student_id: impl Into<String>,
        program: impl Into<String>,
        enrollment_year: u16,
        owner_school_id: SchoolId,
    ) -> Self {
        Self {
            id: StudentId::new(),
            name: name.into(),
            email: email.into(),
            external_student_id: external_student_id.into(),
            program: program.into(),
            enrollment_year,
            owner_school_id,
        }
    }
}

/// A certificate issued by a school to a student.
///
/// Written once at issuance and immutable thereafter. Always references
/// exactly one existing [`StudentRecord`] and the school that issued it.
///
/// `file_digest` is the SHA-256 of the exact bytes stored at
/// `file_location` at upload time; routine reads do not re-verify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Stable record identifier.
    pub id: CertificateId,
    /// Human-readable certificate name (e.g., "BSc Computer Science").
    pub name: String,
    /// The date printed on the certificate.
    pub issue_date: NaiveDate,
    /// When the file was uploaded.
    pub upload_date: DateTime<Utc>,
    /// Blob-store location of the file bytes.
    pub file_location: String,
    /// Original file name as submitted.
    pub file_name: String,
    /// MIME type as submitted.
    pub file_type: String,
    /// Digest of the exact bytes at `file_location`, computed at upload.
    pub file_digest: ContentDigest,
    /// The issuing school.
    pub owner_school_id: SchoolId,
    /// The student the certificate was issued to.
    pub student_id: StudentId,
}
