//! # Integration Tests for credentia-api
//!
//! Tests sign-up and workspace resolution, role guards on every surface,
//! the full issuance-to-revocation scenario, grant display ordering,
//! duplicate-request rejection, and OpenAPI spec generation.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use credentia_api::auth::PRINCIPAL_HEADER;
use credentia_api::AppState;

/// Helper: build the test app over in-memory stores.
fn test_app() -> axum::Router {
    credentia_api::app(AppState::in_memory())
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Helper: GET with a principal header.
fn get_as(uri: &str, principal: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(PRINCIPAL_HEADER, principal)
        .body(Body::empty())
        .unwrap()
}

/// Helper: POST JSON with a principal header.
fn post_json_as(uri: &str, principal: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(PRINCIPAL_HEADER, principal)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Helper: POST with an empty body and a principal header.
fn post_as(uri: &str, principal: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(PRINCIPAL_HEADER, principal)
        .body(Body::empty())
        .unwrap()
}

/// Helper: sign up a principal and return its id as a header-ready string.
async fn signup(app: &axum::Router, email: &str, role: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/signup")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "email": email,
                        "password": "correct-horse",
                        "role": role,
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["principal_id"].as_str().unwrap().to_string()
}

/// Helper: enroll a student under the given school, returning the record id.
async fn enroll(app: &axum::Router, school: &str, name: &str, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json_as(
            "/v1/school/students",
            school,
            &json!({
                "name": name,
                "email": email,
                "external_student_id": "S-1001",
                "program": "Computer Science",
                "enrollment_year": 2024,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

/// Helper: upload a certificate file for a student, returning the record.
async fn issue(app: &axum::Router, school: &str, student_id: &str, name: &str, bytes: &[u8]) -> Value {
    let uri = format!(
        "/v1/school/students/{student_id}/certificates?name={name}&issue_date=2024-06-15&file_name=diploma.pdf&file_type=application/pdf"
    );
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(PRINCIPAL_HEADER, school)
                .header("content-type", "application/pdf")
                .body(Body::from(bytes.to_vec()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/readiness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Sign-Up ------------------------------------------------------------------

#[tokio::test]
async fn test_signup_returns_workspace_for_each_role() {
    let app = test_app();
    for (role, workspace) in [
        ("school", "/dashboard/school"),
        ("student", "/dashboard/student"),
        ("company", "/dashboard/company"),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/signup")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_string(&json!({
                            "email": format!("{role}@example.com"),
                            "password": "correct-horse",
                            "role": role,
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["role"], role);
        assert_eq!(body["workspace"], workspace);
        assert!(Uuid::parse_str(body["principal_id"].as_str().unwrap()).is_ok());
    }
}

#[tokio::test]
async fn test_signup_duplicate_email_conflict() {
    let app = test_app();
    signup(&app, "dup@example.com", "school").await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/signup")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "email": "dup@example.com",
                        "password": "correct-horse",
                        "role": "company",
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_bad_input() {
    let app = test_app();
    for bad in [
        json!({"email": "not-an-email", "password": "correct-horse", "role": "school"}),
        json!({"email": "a@example.com", "password": "short", "role": "school"}),
        json!({"email": "a@example.com", "password": "correct-horse", "role": "admin"}),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/signup")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&bad).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{bad}");
    }
}

// -- Authentication & Role Guards ---------------------------------------------

#[tokio::test]
async fn test_missing_principal_header_unauthorized() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/session/workspace")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_principal_unauthorized() {
    let app = test_app();
    let response = app
        .oneshot(get_as("/v1/session/workspace", &Uuid::new_v4().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_workspace_resolution() {
    let app = test_app();
    let student = signup(&app, "learner@example.com", "student").await;
    let response = app
        .oneshot(get_as("/v1/session/workspace", &student))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["workspace"], "/dashboard/student");
    assert_eq!(body["principal_id"], student.as_str());
}

#[tokio::test]
async fn test_role_guards_reject_wrong_role() {
    let app = test_app();
    let student = signup(&app, "learner@example.com", "student").await;

    // A student cannot use school or company surfaces.
    for uri in ["/v1/school/students", "/v1/company/grants"] {
        let response = app.clone().oneshot(get_as(uri, &student)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }

    let school = signup(&app, "registrar@example.edu", "school").await;
    let response = app
        .oneshot(get_as("/v1/student/certificates", &school))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// -- Enrollment & Issuance ----------------------------------------------------

#[tokio::test]
async fn test_enrollment_scoped_to_school() {
    let app = test_app();
    let school_a = signup(&app, "a@example.edu", "school").await;
    let school_b = signup(&app, "b@example.edu", "school").await;
    enroll(&app, &school_a, "Ada Lovelace", "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(get_as("/v1/school/students", &school_a))
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "Ada Lovelace");

    // The other school sees nothing.
    let response = app
        .oneshot(get_as("/v1/school/students", &school_b))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_enroll_duplicate_email_conflict() {
    let app = test_app();
    let school_a = signup(&app, "a@example.edu", "school").await;
    let school_b = signup(&app, "b@example.edu", "school").await;
    enroll(&app, &school_a, "Ada Lovelace", "ada@example.com").await;

    // A second record for the same email would leave the student
    // principal linked to an arbitrary one of the two.
    let response = app
        .oneshot(post_json_as(
            "/v1/school/students",
            &school_b,
            &json!({
                "name": "Ada L.",
                "email": "ada@example.com",
                "external_student_id": "S-2002",
                "program": "Mathematics",
                "enrollment_year": 2025,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_issue_certificate_records_digest() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    let student_id = enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;

    let cert = issue(&app, &school, &student_id, "Diploma", b"diploma bytes").await;
    assert_eq!(cert["name"], "Diploma");
    assert_eq!(cert["file_name"], "diploma.pdf");
    assert_eq!(cert["file_type"], "application/pdf");
    let digest = cert["file_digest"].as_str().unwrap();
    assert!(digest.starts_with("sha256:"));
    assert_eq!(digest.len(), "sha256:".len() + 64);
}

#[tokio::test]
async fn test_issue_rejects_empty_file_and_foreign_student() {
    let app = test_app();
    let school_a = signup(&app, "a@example.edu", "school").await;
    let school_b = signup(&app, "b@example.edu", "school").await;
    let student_id = enroll(&app, &school_a, "Ada Lovelace", "ada@example.com").await;

    let uri = format!(
        "/v1/school/students/{student_id}/certificates?name=Diploma&issue_date=2024-06-15&file_name=d.pdf&file_type=application/pdf"
    );
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(&uri)
                .header(PRINCIPAL_HEADER, &school_a)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Another school cannot issue against this record.
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(&uri)
                .header(PRINCIPAL_HEADER, &school_b)
                .body(Body::from("bytes"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_issue_missing_metadata_unprocessable() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    let student_id = enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;

    // No query metadata at all: 422 with the JSON error body, the same
    // class as a malformed JSON body elsewhere.
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/school/students/{student_id}/certificates"))
                .header(PRINCIPAL_HEADER, &school)
                .body(Body::from("bytes"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_reissue_same_file_creates_distinct_record() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    let student_id = enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;

    let first = issue(&app, &school, &student_id, "Diploma", b"same bytes").await;
    let second = issue(&app, &school, &student_id, "Diploma", b"same bytes").await;
    assert_ne!(first["id"], second["id"]);
    assert_ne!(first["file_location"], second["file_location"]);
    assert_eq!(first["file_digest"], second["file_digest"]);
}

// -- Student Access -----------------------------------------------------------

#[tokio::test]
async fn test_student_sees_own_certificates_via_email_link() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    let student_id = enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;
    issue(&app, &school, &student_id, "Diploma", b"diploma bytes").await;

    // Same email as the enrolled record.
    let ada = signup(&app, "ada@example.com", "student").await;
    let response = app
        .clone()
        .oneshot(get_as("/v1/student/certificates", &ada))
        .await
        .unwrap();
    let certs = body_json(response).await;
    assert_eq!(certs.as_array().unwrap().len(), 1);

    // A student with no matching record sees an empty list, not an error.
    let other = signup(&app, "unenrolled@example.com", "student").await;
    let response = app
        .oneshot(get_as("/v1/student/certificates", &other))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_student_downloads_own_file_with_mime_type() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    let student_id = enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;
    let cert = issue(&app, &school, &student_id, "Diploma", b"diploma bytes").await;
    let ada = signup(&app, "ada@example.com", "student").await;

    let uri = format!(
        "/v1/student/certificates/{}/file",
        cert["id"].as_str().unwrap()
    );
    let response = app.oneshot(get_as(&uri, &ada)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    assert_eq!(body_string(response).await, "diploma bytes");
}

#[tokio::test]
async fn test_student_cannot_download_another_students_file() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    let student_id = enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;
    let cert = issue(&app, &school, &student_id, "Diploma", b"diploma bytes").await;
    let stranger = signup(&app, "stranger@example.com", "student").await;

    let uri = format!(
        "/v1/student/certificates/{}/file",
        cert["id"].as_str().unwrap()
    );
    let response = app.oneshot(get_as(&uri, &stranger)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Access Grant Flow --------------------------------------------------------

/// Full scenario: enroll, issue, request, approve, read, revoke.
#[tokio::test]
async fn test_grant_lifecycle_end_to_end() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    let student_id = enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;
    let first = issue(&app, &school, &student_id, "Diploma", b"diploma bytes").await;
    issue(&app, &school, &student_id, "Transcript", b"transcript bytes").await;
    let ada = signup(&app, "ada@example.com", "student").await;
    let acme = signup(&app, "hr@acme.example", "company").await;

    // Company finds the student.
    let response = app
        .clone()
        .oneshot(get_as("/v1/company/students?q=ada", &acme))
        .await
        .unwrap();
    let found = body_json(response).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"], student_id.as_str());

    // Before any grant, certificates are invisible.
    let certs_uri = format!("/v1/company/students/{student_id}/certificates");
    let response = app.clone().oneshot(get_as(&certs_uri, &acme)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Request access.
    let request_body = json!({
        "student_id": student_id,
        "company_name": "Acme Corp",
        "message": "Verifying your diploma for our records.",
    });
    let response = app
        .clone()
        .oneshot(post_json_as("/v1/company/grants", &acme, &request_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let grant = body_json(response).await;
    assert_eq!(grant["status"], "pending");
    let grant_id = grant["id"].as_str().unwrap().to_string();

    // A second identical request is refused while the first is pending.
    let response = app
        .clone()
        .oneshot(post_json_as("/v1/company/grants", &acme, &request_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Pending grant does not confer visibility.
    let response = app.clone().oneshot(get_as(&certs_uri, &acme)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The student sees the request with the company's name and message.
    let response = app
        .clone()
        .oneshot(get_as("/v1/student/grants", &ada))
        .await
        .unwrap();
    let grants = body_json(response).await;
    assert_eq!(grants.as_array().unwrap().len(), 1);
    assert_eq!(grants[0]["company_name"], "Acme Corp");
    assert_eq!(
        grants[0]["message"],
        "Verifying your diploma for our records."
    );

    // Approve.
    let response = app
        .clone()
        .oneshot(post_as(&format!("/v1/student/grants/{grant_id}/approve"), &ada))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "approved");

    // The company now sees both certificates and can fetch a file.
    let response = app.clone().oneshot(get_as(&certs_uri, &acme)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let visible = body_json(response).await;
    assert_eq!(visible.as_array().unwrap().len(), 2);

    let file_uri = format!(
        "/v1/company/students/{student_id}/certificates/{}/file",
        first["id"].as_str().unwrap()
    );
    let response = app.clone().oneshot(get_as(&file_uri, &acme)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "diploma bytes");

    // Revoke; visibility is gone for subsequent reads.
    let response = app
        .clone()
        .oneshot(post_as(&format!("/v1/student/grants/{grant_id}/revoke"), &ada))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["status"], "revoked");

    let response = app.clone().oneshot(get_as(&certs_uri, &acme)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = app.clone().oneshot(get_as(&file_uri, &acme)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Revoked is terminal.
    let response = app
        .oneshot(post_as(&format!("/v1/student/grants/{grant_id}/approve"), &ada))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_new_request_allowed_after_denial() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    let student_id = enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;
    let ada = signup(&app, "ada@example.com", "student").await;
    let acme = signup(&app, "hr@acme.example", "company").await;

    let request_body = json!({
        "student_id": student_id,
        "company_name": "Acme Corp",
    });
    let response = app
        .clone()
        .oneshot(post_json_as("/v1/company/grants", &acme, &request_body))
        .await
        .unwrap();
    let grant_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(post_as(&format!("/v1/student/grants/{grant_id}/deny"), &ada))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["status"], "denied");

    // The denied request no longer blocks a fresh one.
    let response = app
        .oneshot(post_json_as("/v1/company/grants", &acme, &request_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_student_cannot_touch_another_students_grant() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    let student_id = enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;
    signup(&app, "ada@example.com", "student").await;
    let acme = signup(&app, "hr@acme.example", "company").await;

    let response = app
        .clone()
        .oneshot(post_json_as(
            "/v1/company/grants",
            &acme,
            &json!({"student_id": student_id, "company_name": "Acme Corp"}),
        ))
        .await
        .unwrap();
    let grant_id = body_json(response).await["id"].as_str().unwrap().to_string();

    // Enrolled elsewhere, but not a party to this grant: 404, not 403.
    enroll(&app, &school, "Grace Hopper", "grace@example.com").await;
    let grace = signup(&app, "grace@example.com", "student").await;
    let response = app
        .oneshot(post_as(&format!("/v1/student/grants/{grant_id}/approve"), &grace))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_grant_display_ordering() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    let student_id = enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;
    let ada = signup(&app, "ada@example.com", "student").await;

    // Three companies request access; one gets approved, one denied.
    let mut grant_ids = Vec::new();
    for name in ["One Corp", "Two Corp", "Three Corp"] {
        let company = signup(&app, &format!("hr@{name}.example").replace(' ', ""), "company").await;
        let response = app
            .clone()
            .oneshot(post_json_as(
                "/v1/company/grants",
                &company,
                &json!({"student_id": student_id, "company_name": name}),
            ))
            .await
            .unwrap();
        grant_ids.push(body_json(response).await["id"].as_str().unwrap().to_string());
    }
    app.clone()
        .oneshot(post_as(&format!("/v1/student/grants/{}/approve", grant_ids[0]), &ada))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_as(&format!("/v1/student/grants/{}/deny", grant_ids[1]), &ada))
        .await
        .unwrap();

    let response = app
        .oneshot(get_as("/v1/student/grants", &ada))
        .await
        .unwrap();
    let grants = body_json(response).await;
    let statuses: Vec<&str> = grants
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["status"].as_str().unwrap())
        .collect();
    // Pending first, then approved, then terminal.
    assert_eq!(statuses, vec!["pending", "approved", "denied"]);
}

// -- Search -------------------------------------------------------------------

#[tokio::test]
async fn test_search_matches_name_email_and_external_id() {
    let app = test_app();
    let school = signup(&app, "registrar@example.edu", "school").await;
    enroll(&app, &school, "Ada Lovelace", "ada@example.com").await;
    let acme = signup(&app, "hr@acme.example", "company").await;

    for query in ["LOVELACE", "ada@", "S-1001"] {
        let response = app
            .clone()
            .oneshot(get_as(&format!("/v1/company/students?q={query}"), &acme))
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await.as_array().unwrap().len(),
            1,
            "{query}"
        );
    }

    // Empty query matches nothing rather than everything.
    let response = app
        .oneshot(get_as("/v1/company/students?q=", &acme))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_is_served() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert_eq!(spec["info"]["title"], "Credentia API");
    let paths = spec["paths"].as_object().unwrap();
    assert!(paths.contains_key("/v1/signup"));
    assert!(paths.contains_key("/v1/company/grants"));
    assert!(paths.contains_key("/v1/student/grants/{id}/approve"));
}
