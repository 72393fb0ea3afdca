//! # Validated JSON Extraction
//!
//! Request bodies are validated before any handler logic runs: a JSON
//! deserialization failure and a failed business-rule check both map to
//! 422 with a per-field message, and nothing reaches the store.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request types that can check their own field-level invariants.
pub trait Validate {
    /// Returns a per-field message on the first violated rule.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON body extraction and run the type's validation.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

/// Minimal well-formedness check for an email address: non-empty local
/// part, an `@`, and a dot somewhere after it. Full RFC validation is
/// the identity provider's job; this catches obvious typos before a
/// record is written.
pub fn validate_email(email: &str) -> Result<(), String> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(format!("email {email:?} is missing '@'"));
    };
    if local.is_empty() || domain.len() < 3 || !domain.contains('.') {
        return Err(format!("email {email:?} is malformed"));
    }
    Ok(())
}
