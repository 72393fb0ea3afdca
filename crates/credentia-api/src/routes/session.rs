//! # Sign-Up and Identity Resolution
//!
//! Routes:
//! - POST /v1/signup — Create a principal with a fixed role
//! - GET  /v1/session/workspace — Resolve the caller's workspace path
//!
//! The workspace endpoint is the identity resolver: a client sitting at
//! the entry screen asks where its principal belongs and navigates to the
//! returned role-specific path. Role is fixed at sign-up and never
//! re-derived from any other signal.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use credentia_core::{Principal, Role};

use crate::auth::Caller;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_validated_json, validate_email, Validate};
use crate::state::AppState;

/// Minimum password length accepted at sign-up.
const MIN_PASSWORD_LEN: usize = 8;

/// Sign-up request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    /// Checked for length, then handed to the external identity
    /// provider. Never stored by this service.
    pub password: String,
    /// One of `school`, `student`, `company`.
    pub role: String,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)?;
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ));
        }
        Ok(())
    }
}

/// Sign-up response: the new principal and where it belongs.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub principal_id: Uuid,
    pub role: String,
    pub workspace: String,
}

/// Workspace resolution response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkspaceResponse {
    pub principal_id: Uuid,
    pub role: String,
    pub workspace: String,
}

/// Build the session router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/signup", post(signup))
        .route("/v1/session/workspace", get(workspace))
}

/// POST /v1/signup — Create a principal.
#[utoipa::path(
    post,
    path = "/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Principal created", body = SignupResponse),
        (status = 409, description = "Email already registered", body = ErrorBody),
        (status = 422, description = "Malformed email, short password, or unknown role", body = ErrorBody),
    ),
    tag = "session"
)]
pub(crate) async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let role = Role::from_str(&req.role).map_err(|e| AppError::Validation(e.to_string()))?;

    let principal = Principal::new(req.email, role);
    let response = SignupResponse {
        principal_id: principal.id.0,
        role: role.as_str().to_string(),
        workspace: role.workspace_path().to_string(),
    };
    state.documents.insert_principal(principal)?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /v1/session/workspace — Resolve the caller's workspace.
#[utoipa::path(
    get,
    path = "/v1/session/workspace",
    responses(
        (status = 200, description = "Workspace path for the caller's role", body = WorkspaceResponse),
        (status = 401, description = "Missing or unknown principal", body = ErrorBody),
    ),
    tag = "session"
)]
pub(crate) async fn workspace(caller: Caller) -> Json<WorkspaceResponse> {
    let role = caller.principal.role;
    Json(WorkspaceResponse {
        principal_id: caller.principal.id.0,
        role: role.as_str().to_string(),
        workspace: role.workspace_path().to_string(),
    })
}
