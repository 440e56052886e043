mod common;

use blog_service::domain::session::models::SessionId;
use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .register("nicola", "nicola@example.com", "pass_word!")
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());

    // Registration does not log the user in
    assert_eq!(app.sessions.count(), 0);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let response = app
        .register("nicola", "other@example.com", "pass_word!")
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
    assert_eq!(app.users.count(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let response = app
        .register("other", "nicola@example.com", "pass_word!")
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.users.count(), 1);
}

#[tokio::test]
async fn test_register_invalid_fields() {
    let app = TestApp::spawn().await;

    let short_name = app.register("ab", "ab@example.com", "pass_word!").await;
    assert_eq!(short_name.status(), StatusCode::BAD_REQUEST);

    let bad_email = app.register("nicola", "not-an-email", "pass_word!").await;
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);

    let short_password = app.register("nicola", "nicola@example.com", "123").await;
    assert_eq!(short_password.status(), StatusCode::BAD_REQUEST);

    let long_password = app
        .register("nicola", "nicola@example.com", &"x".repeat(73))
        .await;
    assert_eq!(long_password.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.users.count(), 0);
}

#[tokio::test]
async fn test_register_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid request payload");
}

#[tokio::test]
async fn test_login_success_creates_session() {
    let app = TestApp::spawn().await;

    let token = app.register_and_login("nicola", "pass_word!").await;

    let claims = app
        .jwt_handler
        .validate(&token)
        .expect("issued token should validate");
    let session = app
        .sessions
        .get(&SessionId(claims.session_id))
        .expect("session should be stored");

    assert_eq!(session.token, token);
    assert_eq!(session.user_id.0, claims.user_id);
    assert_eq!(session.expires_at.timestamp(), claims.exp);
}

#[tokio::test]
async fn test_each_login_opens_a_new_session() {
    let app = TestApp::spawn().await;

    let first = app.register_and_login("nicola", "pass_word!").await;
    let response = app.login("nicola", "pass_word!").await;
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let second = body["data"]["token"].as_str().unwrap().to_string();

    assert_ne!(first, second);
    assert_eq!(app.sessions.count(), 2);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let wrong_password = app.login("nicola", "wrong_password").await;
    let unknown_user = app.login("nobody", "pass_word!").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(app.sessions.count(), 0);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app.login("", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post("/auth/login")
        .json(&json!({ "username": "nicola" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("nicola", "pass_word!").await;

    let response = app
        .get_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_protected_route_rejects_bad_authorization() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("nicola", "pass_word!").await;

    let no_header = app
        .get("/auth/me")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(no_header.status(), StatusCode::UNAUTHORIZED);

    for value in [
        "Bearer".to_string(),
        format!("Basic {}", token),
        format!("Bearer {} extra", token),
        "Bearer not.a.token".to_string(),
    ] {
        let response = app
            .get("/auth/me")
            .header("authorization", value)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::spawn().await;
    app.register_and_login("nicola", "pass_word!").await;

    let expired = app
        .jwt_handler
        .issue(Uuid::new_v4(), Uuid::new_v4(), Duration::seconds(-1))
        .unwrap();

    let response = app
        .get_authenticated("/auth/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_another_secret_is_rejected() {
    let app = TestApp::spawn().await;

    let forged = auth::JwtHandler::new(b"some-other-secret-that-is-long-enough")
        .issue(Uuid::new_v4(), Uuid::new_v4(), Duration::hours(1))
        .unwrap();

    let response = app
        .post_authenticated("/api/v1/posts", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/posts")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // A garbage header on a public route is ignored
    let response = app
        .get("/api/v1/posts")
        .header("authorization", "Bearer garbage")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_write_route_receives_identity() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/posts")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = app.register_and_login("nicola", "pass_word!").await;
    let claims = app.jwt_handler.validate(&token).unwrap();

    let response = app
        .post_authenticated("/api/v1/posts", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["author_id"], claims.user_id.to_string());
    assert_eq!(body["session_id"], claims.session_id.to_string());
}

#[tokio::test]
async fn test_logout_removes_session_and_is_repeatable() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("nicola", "pass_word!").await;
    let claims = app.jwt_handler.validate(&token).unwrap();

    let response = app
        .post_authenticated("/auth/logout", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Logged out successfully");
    assert!(app.sessions.get(&SessionId(claims.session_id)).is_none());

    let response = app
        .post_authenticated("/auth/logout", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/logout")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_by_id_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .register("nicola", "nicola@private.example", "pass_word!")
        .await;
    let body: serde_json::Value = response.json().await.unwrap();
    let user_id = body["data"]["id"].as_str().unwrap().to_string();

    // Anonymous callers never see another user's email
    let response = app
        .get(&format!("/api/v1/users/{}", user_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response.text().await.unwrap();
    assert!(!body.contains("nicola@private.example"));

    let token = app.register_and_login("reader", "pass_word!").await;

    let response = app
        .get_authenticated(&format!("/api/v1/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["username"], "nicola");

    let response = app
        .get_authenticated(&format!("/api/v1/users/{}", Uuid::new_v4()), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated("/api/v1/users/not-a-uuid", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
