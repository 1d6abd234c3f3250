//! Enrollment state machine over HTTP.

use axum::http::StatusCode;
use portal_entity::user::Role;
use uuid::Uuid;

use crate::helpers::{OWNER_EMAIL, OWNER_PASSWORD, TEST_PASSWORD, TestApp};

/// Creates a published class and returns its ID.
async fn published_class(app: &TestApp) -> Uuid {
    app.seed_user("author@kizuna.example", Role::CompanyAdmin, Some("FUK"));
    let (token, _) = app.login("author@kizuna.example", TEST_PASSWORD).await;
    let id = app
        .create_content(
            &token,
            "classes",
            serde_json::json!({ "title": "Autumn Cohort", "visibility_scope": "public" }),
        )
        .await;
    app.publish_content("classes", id).await;
    id
}

#[tokio::test]
async fn test_enroll_and_double_enroll() {
    let app = TestApp::new();
    let id = published_class(&app).await;
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));
    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    let uri = format!("/api/content/classes/{id}/enrollment");

    let (status, body) = app.request("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enrolled"], true);
    assert_eq!(body["data"]["enrolled_count"], 1);

    // A second attempt is rejected, not silently accepted.
    let (status, body) = app.request("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ALREADY_ENROLLED");
}

#[tokio::test]
async fn test_withdraw_and_double_withdraw() {
    let app = TestApp::new();
    let id = published_class(&app).await;
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));
    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    let uri = format!("/api/content/classes/{id}/enrollment");

    app.request("POST", &uri, Some(&token), None).await;

    let (status, body) = app.request("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enrolled"], false);

    let (status, body) = app.request("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_enroll_closed_class_is_invalid_state() {
    let app = TestApp::new();
    let id = published_class(&app).await;

    let (admin_token, _) = app.login(OWNER_EMAIL, OWNER_PASSWORD).await;
    let (status, _) = app
        .request(
            "POST",
            &format!("/api/content/classes/{id}/close"),
            Some(&admin_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));
    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/content/classes/{id}/enrollment"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "INVALID_STATE");
}

#[tokio::test]
async fn test_withdraw_after_close_still_legal() {
    let app = TestApp::new();
    let id = published_class(&app).await;
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));
    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    let uri = format!("/api/content/classes/{id}/enrollment");
    let (status, _) = app.request("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (admin_token, _) = app.login(OWNER_EMAIL, OWNER_PASSWORD).await;
    app.request(
        "POST",
        &format!("/api/content/classes/{id}/close"),
        Some(&admin_token),
        None,
    )
    .await;

    let (status, body) = app.request("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["enrolled"], false);
}

#[tokio::test]
async fn test_announcements_reject_enrollment() {
    let app = TestApp::new();
    app.seed_user("author@kizuna.example", Role::CompanyAdmin, Some("FUK"));
    let (author_token, _) = app.login("author@kizuna.example", TEST_PASSWORD).await;
    let id = app
        .create_content(
            &author_token,
            "announcements",
            serde_json::json!({ "title": "Holiday Notice", "visibility_scope": "public" }),
        )
        .await;
    app.publish_content("announcements", id).await;

    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));
    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/content/announcements/{id}/enrollment"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
