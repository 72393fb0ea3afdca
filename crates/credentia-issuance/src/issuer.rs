//! # Certificate Issuer
//!
//! The digest is computed from the original bytes prior to upload, not
//! re-derived from the stored copy, so the record attests to integrity
//! only if the storage layer preserves bytes in transit. [`verify()`]
//! closes that gap on demand by re-fetching and re-hashing.
//!
//! [`verify()`]: CertificateIssuer::verify

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use credentia_core::{
    sha256_digest, Certificate, CertificateId, ContentDigest, SchoolId, StudentId,
};
use credentia_store::{certificate_location, BlobStore, DocumentStore, StoreError};

/// A file submitted by the issuing school, exactly as received.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name.
    pub file_name: String,
    /// MIME type as submitted.
    pub file_type: String,
    /// The exact bytes to store and attest to.
    pub bytes: Vec<u8>,
}

/// Errors raised during issuance and verification.
#[derive(Error, Debug)]
pub enum IssueError {
    /// The target student does not exist.
    #[error("student {0} not found")]
    StudentNotFound(StudentId),

    /// The target student was enrolled by a different school.
    #[error("student {student_id} does not belong to school {school_id}")]
    WrongSchool {
        /// The student the school tried to issue to.
        student_id: StudentId,
        /// The issuing school.
        school_id: SchoolId,
    },

    /// The uploaded file had no bytes.
    #[error("uploaded file is empty")]
    EmptyFile,

    /// The certificate record to verify does not exist.
    #[error("certificate {0} not found")]
    CertificateNotFound(CertificateId),

    /// Retrieval-time verification found bytes that do not hash to the
    /// recorded digest.
    #[error("digest mismatch for certificate {certificate_id}: recorded {recorded}, computed {computed}")]
    DigestMismatch {
        /// The certificate whose bytes were checked.
        certificate_id: CertificateId,
        /// The digest recorded at upload time.
        recorded: ContentDigest,
        /// The digest of the bytes currently stored.
        computed: ContentDigest,
    },

    /// Underlying storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Issues certificates against a document store and a blob store.
#[derive(Clone)]
pub struct CertificateIssuer {
    documents: Arc<DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl CertificateIssuer {
    /// Create an issuer over the given stores.
    pub fn new(documents: Arc<DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { documents, blobs }
    }

    /// Issue a certificate: digest, store, record.
    ///
    /// The student must exist and belong to the issuing school. The
    /// digest is computed before the blob write; the record is written
    /// after it, so a failed blob write leaves no dangling record.
    pub fn issue(
        &self,
        school_id: SchoolId,
        student_id: StudentId,
        certificate_name: &str,
        issue_date: NaiveDate,
        file: UploadedFile,
    ) -> Result<Certificate, IssueError> {
        let student = self
            .documents
            .student(&student_id)
            .ok_or(IssueError::StudentNotFound(student_id))?;
        if student.owner_school_id != school_id {
            return Err(IssueError::WrongSchool {
                student_id,
                school_id,
            });
        }
        if file.bytes.is_empty() {
            return Err(IssueError::EmptyFile);
        }

        let file_digest = sha256_digest(&file.bytes);
        let file_location = certificate_location(&school_id, &student_id, &file.file_name);
        self.blobs.put(&file_location, &file.bytes)?;

        let certificate = Certificate {
            id: CertificateId::new(),
            name: certificate_name.to_string(),
            issue_date,
            upload_date: Utc::now(),
            file_location,
            file_name: file.file_name,
            file_type: file.file_type,
            file_digest,
            owner_school_id: school_id,
            student_id,
        };
        self.documents.insert_certificate(certificate.clone());

        tracing::info!(
            certificate_id = %certificate.id,
            student_id = %student_id,
            school_id = %school_id,
            digest = %certificate.file_digest,
            "certificate issued"
        );
        Ok(certificate)
    }

    /// Fetch the file bytes for a certificate.
    pub fn fetch_file(&self, certificate: &Certificate) -> Result<Vec<u8>, IssueError> {
        Ok(self.blobs.get(&certificate.file_location)?)
    }

    /// Re-fetch a certificate's bytes and check them against the
    /// recorded digest. Not invoked on routine reads.
    pub fn verify(&self, certificate_id: &CertificateId) -> Result<(), IssueError> {
        let certificate = self
            .documents
            .certificate(certificate_id)
            .ok_or(IssueError::CertificateNotFound(*certificate_id))?;
        let bytes = self.blobs.get(&certificate.file_location)?;
        let computed = sha256_digest(&bytes);
        if computed != certificate.file_digest {
            return Err(IssueError::DigestMismatch {
                certificate_id: certificate.id,
                recorded: certificate.file_digest,
                computed,
            });
        }
        Ok(())
    }
}
