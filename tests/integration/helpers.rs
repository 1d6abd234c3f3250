//! Shared test helpers for integration tests.

use std::collections::HashSet;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use portal_api::AppState;
use portal_core::config::AppConfig;
use portal_entity::user::{Role, User, UserStatus};

/// Password used for every seeded test account.
pub const TEST_PASSWORD: &str = "Passw0rd!now";

/// Email of the bootstrap owner seeded by `build_state`.
pub const OWNER_EMAIL: &str = "owner@kizuna.example";
/// Password of the bootstrap owner (config default).
pub const OWNER_PASSWORD: &str = "change-me-on-first-login";

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Application state for direct seeding.
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with in-memory state and the
    /// bootstrap owner seeded.
    pub fn new() -> Self {
        let state = portal_api::build_state(AppConfig::default()).expect("build state");
        let router = portal_api::build_app(state.clone());
        Self { router, state }
    }

    /// Seeds an active user with [`TEST_PASSWORD`].
    pub fn seed_user(&self, email: &str, role: Role, region: Option<&str>) -> User {
        let password_hash = self
            .state
            .password_hasher
            .hash_password(TEST_PASSWORD)
            .expect("hash password");

        self.state
            .users
            .insert(User {
                id: Uuid::new_v4(),
                email: email.to_string(),
                display_name: email.to_string(),
                password_hash,
                role,
                region: region.map(Into::into),
                accessible_regions: HashSet::new(),
                email_verified: true,
                totp_enabled: false,
                status: UserStatus::Active,
                created_at: Utc::now(),
                last_login_at: None,
            })
            .expect("seed user")
    }

    /// Logs a user in over HTTP and returns (access_token, refresh_token).
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");

        let access = body["data"]["access_token"].as_str().unwrap().to_string();
        let refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();
        (access, refresh)
    }

    /// Sends a request and returns the status plus parsed JSON body.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    /// Creates content as the given user and returns its ID.
    pub async fn create_content(&self, token: &str, kind: &str, body: Value) -> Uuid {
        let (status, response) = self
            .request("POST", &format!("/api/content/{kind}"), Some(token), Some(body))
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {response}");
        response["data"]["id"].as_str().unwrap().parse().unwrap()
    }

    /// Publishes content as the bootstrap owner.
    pub async fn publish_content(&self, kind: &str, id: Uuid) {
        let (owner_token, _) = self.login(OWNER_EMAIL, OWNER_PASSWORD).await;
        let (status, body) = self
            .request(
                "POST",
                &format!("/api/content/{kind}/{id}/publish"),
                Some(&owner_token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "publish failed: {body}");
    }
}
