//! # Caller Resolution
//!
//! Resolves the requesting principal from the `x-principal-id` header.
//! Verifying that the caller actually controls that principal is the
//! concern of the external identity provider fronting this service; here
//! the identifier is taken as authenticated.
//!
//! The [`Caller`] extractor replaces the original system's process-wide
//! mutable "current principal": every handler receives the caller
//! explicitly, resolved against the document store per request.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use credentia_core::{CompanyId, Principal, PrincipalId, Role, SchoolId};

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's principal identifier.
pub const PRINCIPAL_HEADER: &str = "x-principal-id";

/// The resolved caller of a request.
#[derive(Debug, Clone)]
pub struct Caller {
    /// The caller's principal record.
    pub principal: Principal,
}

impl Caller {
    /// The caller's school identifier, or 403 if they are not a school.
    pub fn require_school(&self) -> Result<SchoolId, AppError> {
        self.principal
            .school_id()
            .ok_or_else(|| AppError::Forbidden("school role required".to_string()))
    }

    /// The caller's company identifier, or 403 if they are not a company.
    pub fn require_company(&self) -> Result<CompanyId, AppError> {
        self.principal
            .company_id()
            .ok_or_else(|| AppError::Forbidden("company role required".to_string()))
    }

    /// 403 unless the caller holds the given role.
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.principal.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("{role} role required")))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(PRINCIPAL_HEADER)
            .ok_or_else(|| AppError::Unauthorized(format!("missing {PRINCIPAL_HEADER} header")))?;
        let value = header
            .to_str()
            .map_err(|_| AppError::Unauthorized(format!("malformed {PRINCIPAL_HEADER} header")))?;
        let uuid = Uuid::parse_str(value)
            .map_err(|_| AppError::Unauthorized(format!("malformed {PRINCIPAL_HEADER} header")))?;

        let principal = state
            .documents
            .principal(&PrincipalId(uuid))
            .ok_or_else(|| AppError::Unauthorized("unknown principal".to_string()))?;

        Ok(Caller { principal })
    }
}
