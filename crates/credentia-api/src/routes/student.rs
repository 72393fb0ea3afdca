//! # Student Workspace
//!
//! Routes:
//! - GET  /v1/student/certificates — The caller's certificates
//! - GET  /v1/student/certificates/:id/file — Download a certificate file
//! - GET  /v1/student/grants — Access requests involving the caller
//! - POST /v1/student/grants/:id/approve — Approve a pending request
//! - POST /v1/student/grants/:id/deny — Deny a pending request
//! - POST /v1/student/grants/:id/revoke — Revoke an approved grant
//!
//! A student principal is linked to their [`StudentRecord`] by exact
//! email match: the record whose enrollment email equals the caller's
//! sign-up email. A student with no matching record sees empty lists,
//! not an error — enrollment may simply not have happened yet.
//!
//! Grant transition endpoints return 404 for grants that exist but
//! involve a different student, so grant identifiers cannot be probed.

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use credentia_core::{Certificate, CertificateId, GrantId, Role, StudentRecord};
use credentia_grant::AccessGrant;

use crate::auth::Caller;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Build the student router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/student/certificates", get(list_certificates))
        .route("/v1/student/certificates/:id/file", get(download_file))
        .route("/v1/student/grants", get(list_grants))
        .route("/v1/student/grants/:id/approve", post(approve_grant))
        .route("/v1/student/grants/:id/deny", post(deny_grant))
        .route("/v1/student/grants/:id/revoke", post(revoke_grant))
}

/// Resolve the caller's student record via the email link.
fn student_record(state: &AppState, caller: &Caller) -> Result<Option<StudentRecord>, AppError> {
    caller.require_role(Role::Student)?;
    Ok(state.documents.student_by_email(&caller.principal.email))
}

/// GET /v1/student/certificates — The caller's certificates.
#[utoipa::path(
    get,
    path = "/v1/student/certificates",
    responses(
        (status = 200, description = "Certificates issued to the caller; empty if not yet enrolled"),
        (status = 403, description = "Caller is not a student", body = ErrorBody),
    ),
    tag = "student"
)]
pub(crate) async fn list_certificates(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Certificate>>, AppError> {
    let certificates = match student_record(&state, &caller)? {
        Some(record) => state.documents.certificates_by_student(&record.id),
        None => Vec::new(),
    };
    Ok(Json(certificates))
}

/// GET /v1/student/certificates/:id/file — Download a certificate file.
#[utoipa::path(
    get,
    path = "/v1/student/certificates/{id}/file",
    params(("id" = Uuid, Path, description = "Certificate identifier")),
    responses(
        (status = 200, description = "The stored file bytes, with the recorded MIME type"),
        (status = 403, description = "Caller is not a student", body = ErrorBody),
        (status = 404, description = "No such certificate for this caller", body = ErrorBody),
    ),
    tag = "student"
)]
pub(crate) async fn download_file(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    let record = student_record(&state, &caller)?
        .ok_or_else(|| AppError::NotFound(format!("certificate {id} not found")))?;
    let certificate = state
        .documents
        .certificate(&CertificateId(id))
        .filter(|c| c.student_id == record.id)
        .ok_or_else(|| AppError::NotFound(format!("certificate {id} not found")))?;

    serve_certificate_file(&state, &certificate)
}

/// Fetch a certificate's bytes and attach its recorded MIME type.
pub(crate) fn serve_certificate_file(
    state: &AppState,
    certificate: &Certificate,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    let bytes = state.issuer.fetch_file(certificate)?;
    let mut headers = HeaderMap::new();
    let content_type = HeaderValue::from_str(&certificate.file_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    headers.insert(CONTENT_TYPE, content_type);
    Ok((headers, bytes))
}

/// GET /v1/student/grants — Access requests involving the caller.
///
/// Display order: pending first, then approved, then denied/revoked;
/// most recent request first within each tier.
#[utoipa::path(
    get,
    path = "/v1/student/grants",
    responses(
        (status = 200, description = "Grants involving the caller, in display order"),
        (status = 403, description = "Caller is not a student", body = ErrorBody),
    ),
    tag = "student"
)]
pub(crate) async fn list_grants(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<AccessGrant>>, AppError> {
    let grants = match student_record(&state, &caller)? {
        Some(record) => state.documents.grants_by_student(&record.id),
        None => Vec::new(),
    };
    Ok(Json(grants))
}

/// Look up a grant, verify it involves the caller, and apply a transition.
fn transition_grant(
    state: &AppState,
    caller: &Caller,
    id: Uuid,
    transition: impl FnOnce(&mut AccessGrant) -> Result<(), credentia_grant::GrantError>,
) -> Result<Json<AccessGrant>, AppError> {
    let record = student_record(state, caller)?
        .ok_or_else(|| AppError::NotFound(format!("grant {id} not found")))?;
    let grant_id = GrantId(id);

    // 404 rather than 403 for someone else's grant: do not leak which
    // identifiers exist. A grant's student_id never changes, so checking
    // before the update is safe.
    let owned = state
        .documents
        .grant(&grant_id)
        .is_some_and(|g| g.student_id == record.id);
    if !owned {
        return Err(AppError::NotFound(format!("grant {id} not found")));
    }

    let updated = state.documents.update_grant(&grant_id, transition)?;
    tracing::info!(grant_id = %updated.id, status = %updated.status, "grant transitioned");
    Ok(Json(updated))
}

/// POST /v1/student/grants/:id/approve — Approve a pending request.
#[utoipa::path(
    post,
    path = "/v1/student/grants/{id}/approve",
    params(("id" = Uuid, Path, description = "Grant identifier")),
    responses(
        (status = 200, description = "Grant approved; company gains visibility"),
        (status = 404, description = "No such grant for this caller", body = ErrorBody),
        (status = 409, description = "Grant is not pending", body = ErrorBody),
    ),
    tag = "student"
)]
pub(crate) async fn approve_grant(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<AccessGrant>, AppError> {
    transition_grant(&state, &caller, id, |g| g.approve())
}

/// POST /v1/student/grants/:id/deny — Deny a pending request.
#[utoipa::path(
    post,
    path = "/v1/student/grants/{id}/deny",
    params(("id" = Uuid, Path, description = "Grant identifier")),
    responses(
        (status = 200, description = "Grant denied (terminal)"),
        (status = 404, description = "No such grant for this caller", body = ErrorBody),
        (status = 409, description = "Grant is not pending", body = ErrorBody),
    ),
    tag = "student"
)]
pub(crate) async fn deny_grant(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<AccessGrant>, AppError> {
    transition_grant(&state, &caller, id, |g| g.deny())
}

/// POST /v1/student/grants/:id/revoke — Revoke an approved grant.
#[utoipa::path(
    post,
    path = "/v1/student/grants/{id}/revoke",
    params(("id" = Uuid, Path, description = "Grant identifier")),
    responses(
        (status = 200, description = "Grant revoked; visibility removed for future reads"),
        (status = 404, description = "No such grant for this caller", body = ErrorBody),
        (status = 409, description = "Grant is not approved", body = ErrorBody),
    ),
    tag = "student"
)]
pub(crate) async fn revoke_grant(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<AccessGrant>, AppError> {
    transition_grant(&state, &caller, id, |g| g.revoke())
}
