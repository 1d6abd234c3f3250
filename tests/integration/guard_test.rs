//! Route guard behavior: credential errors and coarse role gates.

use axum::http::StatusCode;
use portal_entity::user::Role;
use uuid::Uuid;

use crate::helpers::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_missing_token_is_401_no_token() {
    let app = TestApp::new();
    let (status, body) = app.request("GET", "/api/content/classes", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "NO_TOKEN");
}

#[tokio::test]
async fn test_garbage_token_is_401_verification_failed() {
    let app = TestApp::new();
    let (status, body) = app
        .request("GET", "/api/content/classes", Some("not-a-jwt"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_VERIFICATION_FAILED");
}

#[tokio::test]
async fn test_student_blocked_from_admin_routes() {
    let app = TestApp::new();
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));
    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    for uri in ["/api/admin/users", "/api/admin/sessions"] {
        let (status, body) = app.request("GET", uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["error"], "INSUFFICIENT_PERMISSIONS");
    }
}

#[tokio::test]
async fn test_student_blocked_from_publish_route() {
    let app = TestApp::new();
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));
    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/content/classes/{}/publish", Uuid::new_v4()),
            Some(&token),
            None,
        )
        .await;

    // The guard short-circuits before the handler ever looks the
    // resource up.
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn test_non_student_blocked_from_enrollment_route() {
    let app = TestApp::new();
    app.seed_user("ca@kizuna.example", Role::CompanyAdmin, Some("FUK"));
    let (token, _) = app.login("ca@kizuna.example", TEST_PASSWORD).await;

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/content/classes/{}/enrollment", Uuid::new_v4()),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn test_student_cannot_create_content() {
    let app = TestApp::new();
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));
    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/content/classes",
            Some(&token),
            Some(serde_json::json!({
                "title": "Rogue Class",
                "visibility_scope": "public"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn test_regionless_company_admin_cannot_create_content() {
    let app = TestApp::new();
    app.seed_user("hq@kizuna.example", Role::CompanyAdmin, None);
    let (token, _) = app.login("hq@kizuna.example", TEST_PASSWORD).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/content/classes",
            Some(&token),
            Some(serde_json::json!({
                "title": "Unhomed Class",
                "visibility_scope": "public"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "INSUFFICIENT_PERMISSIONS");
}
