//! # Credentia API
//!
//! The HTTP surface of the certificate issuance and verification
//! service. Four role-scoped route groups sit behind a shared caller
//! extractor:
//!
//! - **session**: sign-up and workspace resolution
//! - **school**: student enrollment and certificate issuance
//! - **student**: certificate access and grant decisions
//! - **company**: student search and access requests
//!
//! ## Security Invariant
//!
//! Every authenticated handler receives a [`auth::Caller`] carrying the
//! resolved principal; authorization decisions are made against that
//! value alone, never against request-supplied role claims. Health
//! probes and the OpenAPI document are the only unauthenticated routes.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted certificate upload, in bytes.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::session::router())
        .merge(routes::school::router())
        .merge(routes::student::router())
        .merge(routes::company::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health/liveness — Process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// GET /health/readiness — Process is ready to serve requests.
async fn readiness() -> &'static str {
    "ready"
}
