//! # School Workspace
//!
//! Routes:
//! - POST /v1/school/students — Enroll a student
//! - GET  /v1/school/students — List enrolled students
//! - POST /v1/school/students/:id/certificates — Issue a certificate
//! - GET  /v1/school/certificates — List issued certificates
//!
//! Certificate upload takes the raw file bytes as the request body with
//! descriptive metadata in query parameters, so the exact bytes the
//! school submitted are the exact bytes digested and stored.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use credentia_core::{Certificate, StudentId, StudentRecord};
use credentia_issuance::UploadedFile;

use crate::auth::Caller;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_validated_json, validate_email, Validate};
use crate::state::AppState;

/// Enrollment request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollStudentRequest {
    pub name: String,
    pub email: String,
    pub external_student_id: String,
    pub program: String,
    pub enrollment_year: u16,
}

impl Validate for EnrollStudentRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        validate_email(&self.email)?;
        if self.external_student_id.trim().is_empty() {
            return Err("external_student_id must not be empty".to_string());
        }
        if self.program.trim().is_empty() {
            return Err("program must not be empty".to_string());
        }
        if !(1900..=2100).contains(&self.enrollment_year) {
            return Err(format!(
                "enrollment_year {} is out of range",
                self.enrollment_year
            ));
        }
        Ok(())
    }
}

/// Certificate upload metadata, carried in query parameters alongside
/// the raw file body.
#[derive(Debug, Deserialize, IntoParams)]
pub struct IssueParams {
    /// Human-readable certificate name.
    pub name: String,
    /// The date printed on the certificate (YYYY-MM-DD).
    pub issue_date: NaiveDate,
    /// Original file name.
    pub file_name: String,
    /// MIME type of the file.
    pub file_type: String,
}

impl IssueParams {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.file_name.trim().is_empty() {
            return Err("file_name must not be empty".to_string());
        }
        if self.file_type.trim().is_empty() {
            return Err("file_type must not be empty".to_string());
        }
        Ok(())
    }
}

/// Build the school router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/school/students",
            post(enroll_student).get(list_students),
        )
        .route(
            "/v1/school/students/:id/certificates",
            post(issue_certificate),
        )
        .route("/v1/school/certificates", get(list_certificates))
}

/// POST /v1/school/students — Enroll a student.
#[utoipa::path(
    post,
    path = "/v1/school/students",
    request_body = EnrollStudentRequest,
    responses(
        (status = 201, description = "Student enrolled, scoped to the calling school"),
        (status = 403, description = "Caller is not a school", body = ErrorBody),
        (status = 409, description = "A student with this email is already enrolled", body = ErrorBody),
        (status = 422, description = "Missing or malformed field", body = ErrorBody),
    ),
    tag = "school"
)]
pub(crate) async fn enroll_student(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<EnrollStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentRecord>), AppError> {
    let school_id = caller.require_school()?;
    let req = extract_validated_json(body)?;

    let record = StudentRecord::new(
        req.name,
        req.email,
        req.external_student_id,
        req.program,
        req.enrollment_year,
        school_id,
    );
    state.documents.insert_student(record.clone())?;

    tracing::info!(student_id = %record.id, school_id = %school_id, "student enrolled");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/school/students — List the caller's enrolled students.
#[utoipa::path(
    get,
    path = "/v1/school/students",
    responses(
        (status = 200, description = "Students enrolled by the calling school"),
        (status = 403, description = "Caller is not a school", body = ErrorBody),
    ),
    tag = "school"
)]
pub(crate) async fn list_students(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<StudentRecord>>, AppError> {
    let school_id = caller.require_school()?;
    Ok(Json(state.documents.students_by_school(&school_id)))
}

/// POST /v1/school/students/:id/certificates — Issue a certificate.
///
/// The request body is the raw file; metadata rides in the query string.
#[utoipa::path(
    post,
    path = "/v1/school/students/{id}/certificates",
    params(
        ("id" = Uuid, Path, description = "Student record identifier"),
        IssueParams,
    ),
    responses(
        (status = 201, description = "Certificate issued"),
        (status = 403, description = "Caller is not a school, or the student belongs to another school", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 422, description = "Missing metadata or empty file", body = ErrorBody),
    ),
    tag = "school"
)]
pub(crate) async fn issue_certificate(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    params: Result<Query<IssueParams>, QueryRejection>,
    body: axum::body::Bytes,
) -> Result<(StatusCode, Json<Certificate>), AppError> {
    let school_id = caller.require_school()?;
    // Missing or malformed metadata is a validation failure like a bad
    // JSON body, not a bare 400.
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    params.validate().map_err(AppError::Validation)?;

    let file = UploadedFile {
        file_name: params.file_name,
        file_type: params.file_type,
        bytes: body.to_vec(),
    };
    let certificate = state.issuer.issue(
        school_id,
        StudentId(id),
        &params.name,
        params.issue_date,
        file,
    )?;

    Ok((StatusCode::CREATED, Json(certificate)))
}

/// GET /v1/school/certificates — List certificates issued by the caller.
#[utoipa::path(
    get,
    path = "/v1/school/certificates",
    responses(
        (status = 200, description = "Certificates issued by the calling school"),
        (status = 403, description = "Caller is not a school", body = ErrorBody),
    ),
    tag = "school"
)]
pub(crate) async fn list_certificates(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Certificate>>, AppError> {
    let school_id = caller.require_school()?;
    Ok(Json(state.documents.certificates_by_school(&school_id)))
}
