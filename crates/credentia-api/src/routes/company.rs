//! # Company Workspace
//!
//! Routes:
//! - GET  /v1/company/students?q= — Search enrolled students
//! - POST /v1/company/grants — Request access to a student's certificates
//! - GET  /v1/company/grants — The caller's requests, in display order
//! - GET  /v1/company/students/:id/certificates — Visibility-gated list
//! - GET  /v1/company/students/:id/certificates/:cert_id/file — Download
//!
//! The visibility rule is enforced on every read: a company sees a
//! student's certificates if and only if a grant for that exact
//! (company, student) pair is currently approved. A revoked or denied
//! grant removes visibility for future reads; bytes the company fetched
//! while approved are beyond recall.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use credentia_core::{Certificate, CertificateId, StudentId, StudentRecord};
use credentia_grant::AccessGrant;

use crate::auth::Caller;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::student::serve_certificate_file;
use crate::state::AppState;

/// Student search query.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Substring matched against name, email, and external student id.
    pub q: String,
}

/// Access request submission.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RequestAccessRequest {
    /// The student whose certificates are requested.
    pub student_id: Uuid,
    /// Company display name shown to the student.
    pub company_name: String,
    /// Optional message shown to the student alongside the request.
    #[serde(default)]
    pub message: Option<String>,
}

impl Validate for RequestAccessRequest {
    fn validate(&self) -> Result<(), String> {
        if self.company_name.trim().is_empty() {
            return Err("company_name must not be empty".to_string());
        }
        if let Some(message) = &self.message {
            if message.len() > 2000 {
                return Err("message must not exceed 2000 characters".to_string());
            }
        }
        Ok(())
    }
}

/// Build the company router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/company/students", get(search_students))
        .route("/v1/company/grants", post(request_access).get(list_grants))
        .route(
            "/v1/company/students/:id/certificates",
            get(list_student_certificates),
        )
        .route(
            "/v1/company/students/:id/certificates/:cert_id/file",
            get(download_file),
        )
}

/// GET /v1/company/students?q= — Search enrolled students.
#[utoipa::path(
    get,
    path = "/v1/company/students",
    params(SearchParams),
    responses(
        (status = 200, description = "Students matching the query"),
        (status = 403, description = "Caller is not a company", body = ErrorBody),
    ),
    tag = "company"
)]
pub(crate) async fn search_students(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<StudentRecord>>, AppError> {
    caller.require_company()?;
    Ok(Json(state.documents.search_students(&params.q)))
}

/// POST /v1/company/grants — Request access to a student's certificates.
///
/// Refused with 409 when a pending request for the pair already exists;
/// the uniqueness check is atomic in the store, so concurrent duplicates
/// cannot slip through.
#[utoipa::path(
    post,
    path = "/v1/company/grants",
    request_body = RequestAccessRequest,
    responses(
        (status = 201, description = "Pending grant created"),
        (status = 403, description = "Caller is not a company", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 409, description = "A pending request for this student already exists", body = ErrorBody),
        (status = 422, description = "Missing or malformed field", body = ErrorBody),
    ),
    tag = "company"
)]
pub(crate) async fn request_access(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<RequestAccessRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccessGrant>), AppError> {
    caller.require_company()?;
    let req = extract_validated_json(body)?;

    let student_id = StudentId(req.student_id);
    let student = state
        .documents
        .student(&student_id)
        .ok_or_else(|| AppError::NotFound(format!("student {student_id} not found")))?;

    let grant = AccessGrant::request(&caller.principal, req.company_name, &student, req.message);
    state.documents.insert_grant(grant.clone())?;

    tracing::info!(
        grant_id = %grant.id,
        company_id = %grant.company_id,
        student_id = %grant.student_id,
        "access requested"
    );
    Ok((StatusCode::CREATED, Json(grant)))
}

/// GET /v1/company/grants — The caller's requests, in display order.
#[utoipa::path(
    get,
    path = "/v1/company/grants",
    responses(
        (status = 200, description = "Grants submitted by the caller, in display order"),
        (status = 403, description = "Caller is not a company", body = ErrorBody),
    ),
    tag = "company"
)]
pub(crate) async fn list_grants(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<AccessGrant>>, AppError> {
    let company_id = caller.require_company()?;
    Ok(Json(state.documents.grants_by_company(&company_id)))
}

/// GET /v1/company/students/:id/certificates — Visibility-gated list.
#[utoipa::path(
    get,
    path = "/v1/company/students/{id}/certificates",
    params(("id" = Uuid, Path, description = "Student record identifier")),
    responses(
        (status = 200, description = "The student's certificates"),
        (status = 403, description = "No approved grant for this student", body = ErrorBody),
    ),
    tag = "company"
)]
pub(crate) async fn list_student_certificates(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Certificate>>, AppError> {
    let company_id = caller.require_company()?;
    let student_id = StudentId(id);

    if !state.documents.has_approved_grant(&company_id, &student_id) {
        return Err(AppError::Forbidden(format!(
            "no approved access grant for student {student_id}"
        )));
    }
    Ok(Json(state.documents.certificates_by_student(&student_id)))
}

/// GET /v1/company/students/:id/certificates/:cert_id/file — Download.
#[utoipa::path(
    get,
    path = "/v1/company/students/{id}/certificates/{cert_id}/file",
    params(
        ("id" = Uuid, Path, description = "Student record identifier"),
        ("cert_id" = Uuid, Path, description = "Certificate identifier"),
    ),
    responses(
        (status = 200, description = "The stored file bytes, with the recorded MIME type"),
        (status = 403, description = "No approved grant for this student", body = ErrorBody),
        (status = 404, description = "Certificate not found for this student", body = ErrorBody),
    ),
    tag = "company"
)]
pub(crate) async fn download_file(
    State(state): State<AppState>,
    caller: Caller,
    Path((id, cert_id)): Path<(Uuid, Uuid)>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    let company_id = caller.require_company()?;
    let student_id = StudentId(id);

    if !state.documents.has_approved_grant(&company_id, &student_id) {
        return Err(AppError::Forbidden(format!(
            "no approved access grant for student {student_id}"
        )));
    }
    let certificate = state
        .documents
        .certificate(&CertificateId(cert_id))
        .filter(|c| c.student_id == student_id)
        .ok_or_else(|| AppError::NotFound(format!("certificate {cert_id} not found")))?;

    serve_certificate_file(&state, &certificate)
}
