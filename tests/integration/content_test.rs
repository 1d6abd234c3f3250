//! Content visibility, editing, and lifecycle over HTTP.

use axum::http::StatusCode;
use portal_entity::user::Role;

use crate::helpers::{OWNER_EMAIL, OWNER_PASSWORD, TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_region_scoped_visibility() {
    let app = TestApp::new();
    app.seed_user("ca@kizuna.example", Role::CompanyAdmin, Some("FUK"));
    app.seed_user("fuk@kizuna.example", Role::Student, Some("FUK"));
    app.seed_user("tyo@kizuna.example", Role::Student, Some("TYO"));

    let (ca_token, _) = app.login("ca@kizuna.example", TEST_PASSWORD).await;
    let id = app
        .create_content(
            &ca_token,
            "classes",
            serde_json::json!({
                "title": "Regional Safety Training",
                "visibility_scope": "region_based"
            }),
        )
        .await;
    app.publish_content("classes", id).await;

    // Same-region student sees the class.
    let (fuk_token, _) = app.login("fuk@kizuna.example", TEST_PASSWORD).await;
    let (status, body) = app
        .request("GET", &format!("/api/content/classes/{id}"), Some(&fuk_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lifecycle_state"], "published");

    let (_, list) = app
        .request("GET", "/api/content/classes", Some(&fuk_token), None)
        .await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    // Foreign-region student is denied, but the class's existence is
    // not hidden (region scope, not restricted).
    let (tyo_token, _) = app.login("tyo@kizuna.example", TEST_PASSWORD).await;
    let (status, body) = app
        .request("GET", &format!("/api/content/classes/{id}"), Some(&tyo_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "RESOURCE_FORBIDDEN");

    let (_, list) = app
        .request("GET", "/api/content/classes", Some(&tyo_token), None)
        .await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_restricted_content_hidden_as_not_found() {
    let app = TestApp::new();
    app.seed_user("ca@kizuna.example", Role::CompanyAdmin, Some("FUK"));
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));

    let (ca_token, _) = app.login("ca@kizuna.example", TEST_PASSWORD).await;
    let id = app
        .create_content(
            &ca_token,
            "committees",
            serde_json::json!({
                "title": "Disciplinary Committee",
                "visibility_scope": "restricted"
            }),
        )
        .await;
    app.publish_content("committees", id).await;

    // The outsider cannot learn the committee exists.
    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;
    let (status, body) = app
        .request(
            "GET",
            &format!("/api/content/committees/{id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    // Admins still see it.
    let (admin_token, _) = app.login(OWNER_EMAIL, OWNER_PASSWORD).await;
    let (status, _) = app
        .request(
            "GET",
            &format!("/api/content/committees/{id}"),
            Some(&admin_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_draft_hidden_from_others_but_visible_to_author() {
    let app = TestApp::new();
    app.seed_user("ca@kizuna.example", Role::CompanyAdmin, Some("FUK"));
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));

    let (ca_token, _) = app.login("ca@kizuna.example", TEST_PASSWORD).await;
    let id = app
        .create_content(
            &ca_token,
            "announcements",
            serde_json::json!({
                "title": "Unannounced Announcement",
                "visibility_scope": "public"
            }),
        )
        .await;

    // The author sees their own draft.
    let (status, _) = app
        .request(
            "GET",
            &format!("/api/content/announcements/{id}"),
            Some(&ca_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Everyone else does not, even though the scope is public.
    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;
    let (status, _) = app
        .request(
            "GET",
            &format!("/api/content/announcements/{id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, list) = app
        .request("GET", "/api/content/announcements", Some(&token), None)
        .await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_company_admin_edit_rights_depend_on_scope() {
    let app = TestApp::new();
    app.seed_user("author@kizuna.example", Role::CompanyAdmin, Some("FUK"));
    app.seed_user("peer@kizuna.example", Role::CompanyAdmin, Some("FUK"));

    let (author_token, _) = app.login("author@kizuna.example", TEST_PASSWORD).await;
    let public_id = app
        .create_content(
            &author_token,
            "projects",
            serde_json::json!({ "title": "Open Project", "visibility_scope": "public" }),
        )
        .await;
    let regional_id = app
        .create_content(
            &author_token,
            "projects",
            serde_json::json!({ "title": "Regional Project", "visibility_scope": "region_based" }),
        )
        .await;
    app.publish_content("projects", public_id).await;
    app.publish_content("projects", regional_id).await;

    let (peer_token, _) = app.login("peer@kizuna.example", TEST_PASSWORD).await;

    // A company admin may not edit someone else's public-scope content.
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/content/projects/{public_id}"),
            Some(&peer_token),
            Some(serde_json::json!({ "title": "Hijacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "RESOURCE_FORBIDDEN");

    // Non-public scope is editable by company admins.
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/content/projects/{regional_id}"),
            Some(&peer_token),
            Some(serde_json::json!({ "title": "Co-managed Project" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["title"], "Co-managed Project");

    // The author edits their own public content freely.
    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/content/projects/{public_id}"),
            Some(&author_token),
            Some(serde_json::json!({ "title": "Still Mine" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_student_cannot_edit_or_delete_foreign_content() {
    let app = TestApp::new();
    app.seed_user("ca@kizuna.example", Role::CompanyAdmin, Some("FUK"));
    app.seed_user("student@kizuna.example", Role::Student, Some("FUK"));

    let (ca_token, _) = app.login("ca@kizuna.example", TEST_PASSWORD).await;
    let id = app
        .create_content(
            &ca_token,
            "classes",
            serde_json::json!({ "title": "Public Class", "visibility_scope": "public" }),
        )
        .await;
    app.publish_content("classes", id).await;

    let (token, _) = app.login("student@kizuna.example", TEST_PASSWORD).await;

    // Viewing is fine.
    let (status, _) = app
        .request("GET", &format!("/api/content/classes/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Mutation is not.
    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/content/classes/{id}"),
            Some(&token),
            Some(serde_json::json!({ "title": "Renamed" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request("DELETE", &format!("/api/content/classes/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_wrong_kind_segment_is_not_found() {
    let app = TestApp::new();
    app.seed_user("ca@kizuna.example", Role::CompanyAdmin, Some("FUK"));

    let (ca_token, _) = app.login("ca@kizuna.example", TEST_PASSWORD).await;
    let id = app
        .create_content(
            &ca_token,
            "classes",
            serde_json::json!({ "title": "A Class", "visibility_scope": "public" }),
        )
        .await;

    let (status, _) = app
        .request(
            "GET",
            &format!("/api/content/announcements/{id}"),
            Some(&ca_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unrecognized_scope_fails_closed_at_creation() {
    let app = TestApp::new();
    app.seed_user("ca@kizuna.example", Role::CompanyAdmin, Some("FUK"));
    let (ca_token, _) = app.login("ca@kizuna.example", TEST_PASSWORD).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/content/classes",
            Some(&ca_token),
            Some(serde_json::json!({
                "title": "Weird Scope",
                "visibility_scope": "company_wide"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_lifecycle_close_and_illegal_transition() {
    let app = TestApp::new();
    app.seed_user("ca@kizuna.example", Role::CompanyAdmin, Some("FUK"));
    let (ca_token, _) = app.login("ca@kizuna.example", TEST_PASSWORD).await;
    let id = app
        .create_content(
            &ca_token,
            "classes",
            serde_json::json!({ "title": "Lifecycle Class", "visibility_scope": "public" }),
        )
        .await;

    let (admin_token, _) = app.login(OWNER_EMAIL, OWNER_PASSWORD).await;

    // draft -> closed is illegal.
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/content/classes/{id}/close"),
            Some(&admin_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "INVALID_STATE");

    // draft -> published -> closed is the legal path.
    app.publish_content("classes", id).await;
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/content/classes/{id}/close"),
            Some(&admin_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lifecycle_state"], "closed");
}
