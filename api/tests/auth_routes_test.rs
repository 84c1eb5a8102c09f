//! Integration tests for the login and refresh endpoints

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Duration;

use author_api::app::create_app;
use author_api::dto::AuthResponse;
use author_core::domain::value_objects::AuthCode;

use common::{now, state, MemoryStore};

#[actix_web::test]
async fn test_login_issues_tokens() {
    let store = MemoryStore::default().with_user("alice", "p@ss");
    let app = test::init_service(create_app(state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "login_id": "alice", "password": "p@ss" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(body.code, AuthCode::Valid);
    assert!(!body.access_token.is_empty());
    assert_eq!(body.refresh_token.len(), 64);
    assert_eq!(body.expires_at, Some(now() + Duration::seconds(900)));
    assert_eq!(body.refresh_token_expires_at, Some(now() + Duration::days(7)));
    assert_eq!(store.token_count(), 1);
}

#[actix_web::test]
async fn test_repeated_login_returns_same_tokens() {
    let store = MemoryStore::default().with_user("alice", "p@ss");
    let app = test::init_service(create_app(state(&store))).await;

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({ "login_id": "alice", "password": "p@ss" }))
            .to_request();
        let body: AuthResponse = test::call_and_read_body_json(&app, req).await;
        bodies.push(body);
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[actix_web::test]
async fn test_wrong_password_is_unauthorized() {
    let store = MemoryStore::default().with_user("alice", "p@ss");
    let app = test::init_service(create_app(state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "login_id": "alice", "password": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(body.code, AuthCode::InvalidPassword);
    assert!(body.access_token.is_empty());
    assert_eq!(store.token_count(), 0);
}

#[actix_web::test]
async fn test_unknown_user_is_not_found() {
    let store = MemoryStore::default();
    let app = test::init_service(create_app(state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "login_id": "bob", "password": "p@ss" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(body.code, AuthCode::NotRegistered);
}

#[actix_web::test]
async fn test_store_failure_is_internal_error() {
    let store = MemoryStore::default().with_user("alice", "p@ss");
    store.fail();
    let app = test::init_service(create_app(state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "login_id": "alice", "password": "p@ss" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(body.code, AuthCode::InternalError);
}

#[actix_web::test]
async fn test_empty_login_id_is_bad_request() {
    let store = MemoryStore::default();
    let app = test::init_service(create_app(state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "login_id": "", "password": "p@ss" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let store = MemoryStore::default();
    let app = test::init_service(create_app(state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"login_id\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_refresh_rotates_renewal_token() {
    let store = MemoryStore::default().with_user("alice", "p@ss");
    let app = test::init_service(create_app(state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "login_id": "alice", "password": "p@ss" }))
        .to_request();
    let login: AuthResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(serde_json::json!({ "refresh_token": login.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(body.code, AuthCode::Valid);
    assert_ne!(body.refresh_token, login.refresh_token);
    assert_eq!(body.refresh_token.len(), 64);
    assert!(body.access_token.is_empty());
    assert_eq!(body.expires_at, None);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(serde_json::json!({ "refresh_token": login.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_refresh_unknown_token_is_not_found() {
    let store = MemoryStore::default();
    let app = test::init_service(create_app(state(&store))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(serde_json::json!({ "refresh_token": "0".repeat(64) }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(body.code, AuthCode::NotRegistered);
    assert_eq!(store.token_count(), 0);
}

#[actix_web::test]
async fn test_health_without_database() {
    let store = MemoryStore::default();
    let app = test::init_service(create_app(state(&store))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "not_configured");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let store = MemoryStore::default();
    let app = test::init_service(create_app(state(&store))).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
