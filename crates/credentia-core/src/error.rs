//! # Error Types — Structured Error Hierarchy
//!
//! Core-level errors. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations. Higher layers (store, issuance,
//! API) define their own error enums and convert from these where needed.

use thiserror::Error;

/// Errors raised by the foundational types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A role string did not match any known role.
    #[error("unknown role: {0:?} (expected one of: school, student, company)")]
    UnknownRole(String),

    /// A digest string could not be parsed.
    #[error("invalid digest: {0}")]
    DigestParse(String),
}
