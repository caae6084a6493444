mod common;

use auth::TokenValidation;
use common::error_code;
use common::token_pair;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use token_service::domain::authentication::models::RefreshRecordId;

fn record_id_of(app: &TestApp, access_token: &str) -> RefreshRecordId {
    match app.credentials.validate_access_token(access_token) {
        TokenValidation::Valid(claims) | TokenValidation::Expired(claims) => {
            RefreshRecordId::from_string(&claims.refresh_record_id).unwrap()
        }
        TokenValidation::Invalid(e) => panic!("Unexpected invalid token: {}", e),
    }
}

fn flip_signature_char(token: &str) -> String {
    let (signed, signature) = token.rsplit_once('.').unwrap();
    let mut chars: Vec<char> = signature.chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    format!("{}.{}", signed, chars.into_iter().collect::<String>())
}

#[tokio::test]
async fn test_sign_in_success() {
    let app = TestApp::spawn().await;
    app.seed_user("u1");

    let response = app
        .post("/api/auth/sign-in?uuid=u1")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let (access_token, refresh_token) = token_pair(response).await;
    assert_eq!(refresh_token.len(), 64);
    assert!(refresh_token.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(access_token.split('.').count(), 3);
    assert_eq!(app.tokens.len(), 1);
}

#[tokio::test]
async fn test_sign_in_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/sign-in?uuid=ghost")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "USER_NOT_FOUND");
    assert_eq!(app.tokens.len(), 0);
}

#[tokio::test]
async fn test_sign_in_without_owner_id() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/sign-in")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "NO_OWNER_ID");
}

#[tokio::test]
async fn test_rotation_scenario() {
    let app = TestApp::spawn().await;
    app.seed_user("u1");

    let (a1, r1) = app.sign_in("u1").await;

    let response = app.refresh(&a1, &r1).await;
    assert_eq!(response.status(), StatusCode::OK);
    let (a2, r2) = token_pair(response).await;
    assert_ne!(a1, a2);
    assert_ne!(r1, r2);

    let response = app.refresh(&a1, &r1).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "REFRESH_TOKEN_NOT_REGISTERED");

    let response = app.refresh(&a2, &r2).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Only the latest pair's record is live
    assert_eq!(app.tokens.len(), 1);
}

#[tokio::test]
async fn test_refresh_with_mismatched_secret_keeps_record() {
    let app = TestApp::spawn().await;
    app.seed_user("u1");

    let (a1, r1) = app.sign_in("u1").await;
    let (_a2, r2) = app.sign_in("u1").await;

    let response = app.refresh(&a1, &r2).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "TOKEN_MISMATCH");
    assert!(app.tokens.contains(&record_id_of(&app, &a1)));

    let response = app.refresh(&a1, &r1).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_with_tampered_access_token() {
    let app = TestApp::spawn().await;
    app.seed_user("u1");

    let (a1, r1) = app.sign_in("u1").await;

    let response = app.refresh(&flip_signature_char(&a1), &r1).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "INVALID_ACCESS_TOKEN");
    assert!(app.tokens.contains(&record_id_of(&app, &a1)));
}

#[tokio::test]
async fn test_refresh_after_access_token_expiry() {
    let app = TestApp::spawn_with_lifetime(chrono::Duration::minutes(-1)).await;
    app.seed_user("u1");

    let (a1, r1) = app.sign_in("u1").await;
    assert!(matches!(
        app.credentials.validate_access_token(&a1),
        TokenValidation::Expired(_)
    ));

    let response = app.refresh(&a1, &r1).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/refresh")
        .json(&json!({ "access_token": "a.b.c" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "BAD_REFRESH_REQUEST");

    let response = app
        .post("/api/auth/refresh")
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "BAD_REFRESH_REQUEST");
}

#[tokio::test]
async fn test_concurrent_refresh_single_winner() {
    let app = TestApp::spawn().await;
    app.seed_user("u1");

    let (a1, r1) = app.sign_in("u1").await;

    let attempts = (0..8).map(|_| app.refresh(&a1, &r1));
    let responses = futures::future::join_all(attempts).await;

    let mut successes = 0;
    for response in responses {
        if response.status() == StatusCode::OK {
            successes += 1;
        } else {
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(error_code(response).await, "REFRESH_TOKEN_NOT_REGISTERED");
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(app.tokens.len(), 1);
}

#[tokio::test]
async fn test_create_user_and_sign_in() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "name": "Alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Alice");
    assert!(body["data"]["created_at"].is_string());
    let owner_id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&owner_id).is_ok());

    let (access_token, _) = app.sign_in(&owner_id).await;

    let response = app
        .get_authenticated("/api/users/me", &access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], owner_id);
}

#[tokio::test]
async fn test_create_user_invalid_name() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(response).await, "INVALID_INPUT");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "NO_ACCESS_TOKEN_PROVIDED");
}

#[tokio::test]
async fn test_protected_route_rejects_expired_token() {
    let app = TestApp::spawn_with_lifetime(chrono::Duration::minutes(-1)).await;
    app.seed_user("u1");

    let (access_token, _) = app.sign_in("u1").await;

    let response = app
        .get_authenticated("/api/users/me", &access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "ACCESS_TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_protected_route_rejects_tampered_token() {
    let app = TestApp::spawn().await;
    app.seed_user("u1");

    let (access_token, _) = app.sign_in("u1").await;

    let response = app
        .get_authenticated("/api/users/me", &flip_signature_char(&access_token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "INVALID_ACCESS_TOKEN");
}
