// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::TestApp;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use xtaze::domain::models::user::UserRole;
use xtaze::domain::repositories::user_repository::UserRepository;

async fn admin_token(app: &TestApp) -> String {
    app.seed_user("admin@xtaze.test", UserRole::Admin).await;
    app.login("admin", "admin@xtaze.test").await
}

#[tokio::test]
async fn test_coupon_codes_are_unique_case_insensitively() {
    let app = TestApp::spawn().await;
    let token = admin_token(&app).await;
    let expires = Utc::now() + Duration::days(7);

    let created = app
        .server
        .post("/admin/coupons")
        .authorization_bearer(&token)
        .json(&json!({ "code": "summer", "discount": 25, "expires": expires, "maxUses": 100 }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["data"]["code"], "SUMMER");
    assert_eq!(body["data"]["status"], "active");

    let duplicate = app
        .server
        .post("/admin/coupons")
        .authorization_bearer(&token)
        .json(&json!({ "code": "SUMMER", "discount": 10, "expires": expires, "maxUses": 5 }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);
    let body: Value = duplicate.json();
    assert_eq!(body["message"], "Coupon code already exists");
}

#[tokio::test]
async fn test_coupon_with_past_expiry_is_rejected() {
    let app = TestApp::spawn().await;
    let token = admin_token(&app).await;

    let response = app
        .server
        .post("/admin/coupons")
        .authorization_bearer(&token)
        .json(&json!({
            "code": "LATE",
            "discount": 10,
            "expires": Utc::now() - Duration::days(1),
            "maxUses": 5
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toggle_ban_round_trip_and_admin_protection() {
    let app = TestApp::spawn().await;
    let token = admin_token(&app).await;
    let listener = app.seed_user("fan@xtaze.test", UserRole::User).await;
    let ban = format!("/admin/users/{}/ban", listener.id);

    let body: Value = app.server.patch(&ban).authorization_bearer(&token).await.json();
    assert_eq!(body["data"]["isActive"], false);
    assert!(!app.users.find_by_id(listener.id).await.unwrap().unwrap().is_active);

    let body: Value = app.server.patch(&ban).authorization_bearer(&token).await.json();
    assert_eq!(body["data"]["isActive"], true);

    let admin = app.users.find_by_email("admin@xtaze.test").await.unwrap().unwrap();
    let response = app
        .server
        .patch(&format!("/admin/users/{}/ban", admin.id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dashboard_counts_accounts() {
    let app = TestApp::spawn().await;
    let token = admin_token(&app).await;
    let artist = app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    app.seed_user("a@xtaze.test", UserRole::User).await;
    app.seed_user("b@xtaze.test", UserRole::User).await;
    app.seed_track(artist.id, "Counted").await;

    let response = app.server.get("/admin/dashboard").authorization_bearer(&token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["totalUsers"], 2);
    assert_eq!(body["data"]["totalArtists"], 1);
    assert_eq!(body["data"]["totalTracks"], 1);
}

#[tokio::test]
async fn test_genre_names_are_unique_and_blockable() {
    let app = TestApp::spawn().await;
    let token = admin_token(&app).await;

    let created = app
        .server
        .post("/admin/genres")
        .authorization_bearer(&token)
        .json(&json!({ "name": "  hip   hop " }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["data"]["name"], "Hip hop");
    let genre_id = body["data"]["id"].as_str().unwrap().to_string();

    let duplicate = app
        .server
        .post("/admin/genres")
        .authorization_bearer(&token)
        .json(&json!({ "name": "HIP HOP" }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let blocked: Value = app
        .server
        .patch(&format!("/admin/genres/{}/block", genre_id))
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(blocked["data"]["isBlocked"], true);

    let public: Value = app.server.get("/api/songs/genres").await.json();
    assert_eq!(public["data"].as_array().unwrap().len(), 0);
}

/// 审核通过后艺术家状态变为 approved，已审核的申请不能再次审核
#[tokio::test]
async fn test_review_verification_request() {
    let app = TestApp::spawn().await;
    let token = admin_token(&app).await;
    app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let artist = app.login("artist", "artist@xtaze.test").await;

    let submitted = app
        .server
        .post("/artist/verification")
        .authorization_bearer(&artist)
        .multipart(MultipartForm::new().add_part(
            "document",
            Part::bytes(vec![1, 2, 3, 4]).file_name("id.png").mime_type("image/png"),
        ))
        .await;
    assert_eq!(submitted.status_code(), StatusCode::CREATED);

    let pending: Value = app
        .server
        .get("/admin/verifications")
        .add_query_param("status", "pending")
        .authorization_bearer(&token)
        .await
        .json();
    let request_id = pending["data"]["items"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(pending["data"]["items"][0]["artistEmail"], "artist@xtaze.test");

    let review = format!("/admin/verifications/{}", request_id);
    let approved = app
        .server
        .patch(&review)
        .authorization_bearer(&token)
        .json(&json!({ "decision": "approve" }))
        .await;
    assert_eq!(approved.status_code(), StatusCode::OK);

    let status: Value = app
        .server
        .get("/artist/verification")
        .authorization_bearer(&artist)
        .await
        .json();
    assert_eq!(status["data"]["status"], "approved");

    let again = app
        .server
        .patch(&review)
        .authorization_bearer(&token)
        .json(&json!({ "decision": "reject", "feedback": "changed my mind" }))
        .await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_user_token_cannot_reach_admin_routes() {
    let app = TestApp::spawn().await;
    app.seed_user("fan@xtaze.test", UserRole::User).await;
    let token = app.login("user", "fan@xtaze.test").await;

    let response = app.server.get("/admin/dashboard").authorization_bearer(&token).await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
