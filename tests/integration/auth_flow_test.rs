// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{TestApp, GOOGLE_CLIENT_ID, PASSWORD};
use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};
use xtaze::domain::models::user::UserRole;
use xtaze::domain::repositories::user_repository::UserRepository;

/// 注册 -> 邮件验证码 -> 验证建号 -> 登录 -> 刷新 -> 登出
#[tokio::test]
async fn test_register_verify_login_refresh() {
    let app = TestApp::spawn().await;
    let email = "listener@xtaze.test";

    let response = app
        .server
        .post("/user/register")
        .json(&json!({ "name": "Listener", "email": email, "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    // 验证前不落库
    assert!(app.users.find_by_email(email).await.unwrap().is_none());

    let otp = app.otp_sent_to(email).await.expect("otp email");
    let response = app
        .server
        .post("/user/verify-otp")
        .json(&json!({ "email": email, "otp": otp }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["email"], email);
    assert_eq!(body["data"]["role"], "user");

    let login = app
        .server
        .post("/user/login")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);
    let body: Value = login.json();
    let access = body["data"]["accessToken"].as_str().unwrap().to_string();
    let cookie = login.cookie("refreshToken");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));

    let profile = app.server.get("/user/profile").authorization_bearer(&access).await;
    assert_eq!(profile.status_code(), StatusCode::OK);
    let body: Value = profile.json();
    assert_eq!(body["data"]["email"], email);

    let refreshed = app.server.post("/user/refresh").add_cookie(cookie).await;
    assert_eq!(refreshed.status_code(), StatusCode::OK);
    let body: Value = refreshed.json();
    assert!(body["data"]["accessToken"].as_str().is_some());

    let logout = app.server.post("/user/logout").await;
    assert_eq!(logout.status_code(), StatusCode::OK);
    assert_eq!(logout.cookie("refreshToken").value(), "");
}

#[tokio::test]
async fn test_register_existing_email_conflicts() {
    let app = TestApp::spawn().await;
    app.seed_user("taken@xtaze.test", UserRole::User).await;

    let response = app
        .server
        .post("/user/register")
        .json(&json!({ "name": "Again", "email": "Taken@Xtaze.test", "password": PASSWORD }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "User already exists");
    assert_eq!(app.users.count_by_role(UserRole::User).await.unwrap(), 1);
}

#[tokio::test]
async fn test_otp_is_single_use() {
    let app = TestApp::spawn().await;
    let email = "once@xtaze.test";
    app.server
        .post("/user/register")
        .json(&json!({ "name": "Once", "email": email, "password": PASSWORD }))
        .await;
    let otp = app.otp_sent_to(email).await.unwrap();

    let first = app
        .server
        .post("/user/verify-otp")
        .json(&json!({ "email": email, "otp": otp }))
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = app
        .server
        .post("/user/verify-otp")
        .json(&json!({ "email": email, "otp": otp }))
        .await;
    assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_is_scoped_to_role() {
    let app = TestApp::spawn().await;
    app.seed_user("artist@xtaze.test", UserRole::Artist).await;

    let as_user = app
        .server
        .post("/user/login")
        .json(&json!({ "email": "artist@xtaze.test", "password": PASSWORD }))
        .await;
    assert_eq!(as_user.status_code(), StatusCode::UNAUTHORIZED);

    let as_artist = app
        .server
        .post("/artist/login")
        .json(&json!({ "email": "artist@xtaze.test", "password": PASSWORD }))
        .await;
    assert_eq!(as_artist.status_code(), StatusCode::OK);

    let wrong_password = app
        .server
        .post("/artist/login")
        .json(&json!({ "email": "artist@xtaze.test", "password": "not-it" }))
        .await;
    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_artist_token_cannot_reach_user_routes() {
    let app = TestApp::spawn().await;
    app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let token = app.login("artist", "artist@xtaze.test").await;

    let response = app.server.get("/user/profile").authorization_bearer(&token).await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_banned_account_is_locked_out() {
    let app = TestApp::spawn().await;
    let mut user = app.seed_user("banned@xtaze.test", UserRole::User).await;
    let token = app.login("user", "banned@xtaze.test").await;

    user.is_active = false;
    app.users.update(&user).await.unwrap();

    let login = app
        .server
        .post("/user/login")
        .json(&json!({ "email": "banned@xtaze.test", "password": PASSWORD }))
        .await;
    assert_eq!(login.status_code(), StatusCode::FORBIDDEN);

    // 已签发的访问令牌同样失效
    let profile = app.server.get("/user/profile").authorization_bearer(&token).await;
    assert_eq!(profile.status_code(), StatusCode::FORBIDDEN);
    let body: Value = profile.json();
    assert_eq!(body["message"], "Your account has been blocked");
}

#[tokio::test]
async fn test_forgot_and_reset_password() {
    let app = TestApp::spawn().await;
    app.seed_user("forgetful@xtaze.test", UserRole::User).await;

    let response = app
        .server
        .post("/user/forgot-password")
        .json(&json!({ "email": "forgetful@xtaze.test" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let otp = app.otp_sent_to("forgetful@xtaze.test").await.unwrap();

    let response = app
        .server
        .post("/user/reset-password")
        .json(&json!({ "email": "forgetful@xtaze.test", "otp": otp, "newPassword": "brand-new-pass" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let old = app
        .server
        .post("/user/login")
        .json(&json!({ "email": "forgetful@xtaze.test", "password": PASSWORD }))
        .await;
    assert_eq!(old.status_code(), StatusCode::UNAUTHORIZED);

    let new = app
        .server
        .post("/user/login")
        .json(&json!({ "email": "forgetful@xtaze.test", "password": "brand-new-pass" }))
        .await;
    assert_eq!(new.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_google_login_creates_listener() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/tokeninfo"))
        .and(query_param("id_token", "google-credential"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aud": GOOGLE_CLIENT_ID,
            "sub": "google-sub-1",
            "email": "g.user@gmail.test",
            "email_verified": "true",
            "name": "Google User"
        })))
        .mount(&app.external)
        .await;

    let response = app
        .server
        .post("/user/google-login")
        .json(&json!({ "credential": "google-credential" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["user"]["name"], "Google User");
    let user = app.users.find_by_email("g.user@gmail.test").await.unwrap().unwrap();
    assert_eq!(user.google_id.as_deref(), Some("google-sub-1"));
    assert!(user.password_hash.is_none());
}

#[tokio::test]
async fn test_google_login_rejects_foreign_audience() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/tokeninfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aud": "someone-else",
            "sub": "google-sub-2",
            "email": "other@gmail.test",
            "email_verified": "true"
        })))
        .mount(&app.external)
        .await;

    let response = app
        .server
        .post("/user/google-login")
        .json(&json!({ "credential": "foreign" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_provider_login_and_profile() {
    let app = TestApp::spawn().await;
    app.seed_user("label@xtaze.test", UserRole::Provider).await;
    let token = app.login("provider", "label@xtaze.test").await;

    let response = app
        .server
        .get("/provider/profile")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["email"], "label@xtaze.test");
    assert_eq!(body["data"]["role"], "provider");

    let response = app
        .server
        .post("/user/login")
        .json(&json!({ "email": "label@xtaze.test", "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
