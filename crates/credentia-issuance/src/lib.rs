//! # credentia-issuance — Certificate Issuance
//!
//! Turns an uploaded file into an immutable [`Certificate`] record:
//!
//! 1. Validate that the target student exists and belongs to the issuing
//!    school.
//! 2. Compute the SHA-256 digest over the exact upload bytes, *before*
//!    the bytes reach the blob store.
//! 3. Store the bytes at a location scoped by school and student plus a
//!    fresh UUID suffix.
//! 4. Write the certificate record linking school, student, location,
//!    and digest.
//!
//! No dedup, no versioning: re-uploading identical bytes for the same
//! student creates a second independent record with a new identifier and
//! a new storage location (and, necessarily, an identical digest).
//!
//! [`Certificate`]: credentia_core::Certificate

pub mod issuer;

pub use issuer::{CertificateIssuer, IssueError, UploadedFile};
