//! Login, refresh, logout, and revocation flows.

use axum::http::StatusCode;
use portal_entity::user::Role;

use crate::helpers::{OWNER_EMAIL, OWNER_PASSWORD, TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_login_and_me() {
    let app = TestApp::new();
    let (token, _) = app.login(OWNER_EMAIL, OWNER_PASSWORD).await;

    let (status, body) = app.request("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], OWNER_EMAIL);
    assert_eq!(body["data"]["role"], "owner");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({
                "email": OWNER_EMAIL,
                "password": "wrong-password"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_VERIFICATION_FAILED");
}

#[tokio::test]
async fn test_login_unknown_email_same_error_as_wrong_password() {
    let app = TestApp::new();
    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({
                "email": "ghost@kizuna.example",
                "password": "whatever-pass"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_refresh_mints_new_session_and_old_token_survives() {
    let app = TestApp::new();
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));
    let (old_access, refresh) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(serde_json::json!({ "refresh_token": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let new_access = body["data"]["access_token"].as_str().unwrap();
    assert_ne!(new_access, old_access);

    // The new token works, and the old session stays independently
    // alive until revoked or expired.
    let (status, _) = app
        .request("GET", "/api/auth/me", Some(new_access), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request("GET", "/api/auth/me", Some(&old_access), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let app = TestApp::new();
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));
    let (token, refresh) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    let (status, _) = app
        .request("POST", "/api/auth/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // The access token is dead on the next resolution.
    let (status, body) = app.request("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_VERIFICATION_FAILED");

    // And so is the refresh token for the same session.
    let (status, _) = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(serde_json::json!({ "refresh_token": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revoke_all_hits_every_session() {
    let app = TestApp::new();
    let student = app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));

    // Two live sessions for the same user (two devices).
    let (token_a, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;
    let (token_b, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    let (admin_token, _) = app.login(OWNER_EMAIL, OWNER_PASSWORD).await;
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/admin/users/{}/revoke-sessions", student.id),
            Some(&admin_token),
            Some(serde_json::json!({ "reason": "incident response" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["revoked"], 2);

    // Both in-flight credentials fail on their next resolution — a
    // stale success is never served.
    for token in [&token_a, &token_b] {
        let (status, body) = app.request("GET", "/api/auth/me", Some(token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "TOKEN_VERIFICATION_FAILED");
    }
}
