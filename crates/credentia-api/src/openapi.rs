//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credentia API",
        description = "Certificate issuance and verification service.\n\nSchools enroll students and issue certificate files; students view their certificates and grant or revoke company access; companies search for students and request access.\n\nAuthentication: callers identify themselves with the `x-principal-id` header issued at sign-up. Health probes (`/health/*`) are unauthenticated.",
        license(name = "AGPL-3.0-or-later"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Session ──────────────────────────────────────────────────
        crate::routes::session::signup,
        crate::routes::session::workspace,
        // ── School workspace ─────────────────────────────────────────
        crate::routes::school::enroll_student,
        crate::routes::school::list_students,
        crate::routes::school::issue_certificate,
        crate::routes::school::list_certificates,
        // ── Student workspace ────────────────────────────────────────
        crate::routes::student::list_certificates,
        crate::routes::student::download_file,
        crate::routes::student::list_grants,
        crate::routes::student::approve_grant,
        crate::routes::student::deny_grant,
        crate::routes::student::revoke_grant,
        // ── Company workspace ────────────────────────────────────────
        crate::routes::company::search_students,
        crate::routes::company::request_access,
        crate::routes::company::list_grants,
        crate::routes::company::list_student_certificates,
        crate::routes::company::download_file,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::session::SignupRequest,
        crate::routes::session::SignupResponse,
        crate::routes::session::WorkspaceResponse,
        crate::routes::school::EnrollStudentRequest,
        crate::routes::company::RequestAccessRequest,
    )),
    tags(
        (name = "session", description = "Sign-up and identity resolution"),
        (name = "school", description = "Enrollment and certificate issuance"),
        (name = "student", description = "Certificates and grant decisions"),
        (name = "company", description = "Student search and access requests"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(spec))
}

/// GET /openapi.json — The generated OpenAPI document.
async fn spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
