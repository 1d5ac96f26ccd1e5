// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::TestApp;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};
use xtaze::domain::models::coupon::{Coupon, CouponStatus};
use xtaze::domain::models::user::UserRole;
use xtaze::domain::repositories::coupon_repository::CouponRepository;
use xtaze::domain::repositories::user_repository::UserRepository;

async fn seed_coupon(app: &TestApp, code: &str, max_uses: i32) -> Coupon {
    let expires = (Utc::now() + Duration::days(30)).fixed_offset();
    app.coupons
        .create(&Coupon::new(code, 20, expires, max_uses))
        .await
        .unwrap()
}

async fn verify(app: &TestApp, token: &str, code: &str) -> (StatusCode, Value) {
    let response = app
        .server
        .post("/user/coupons/verify")
        .authorization_bearer(token)
        .json(&json!({ "code": code }))
        .await;
    (response.status_code(), response.json())
}

fn monthly_price() -> Value {
    json!({
        "id": "price_monthly",
        "product": {
            "id": "prod_premium",
            "name": "Premium",
            "description": "Ad-free listening",
            "active": true
        },
        "unit_amount": 999,
        "currency": "usd",
        "recurring": { "interval": "month" },
        "active": true
    })
}

#[tokio::test]
async fn test_verify_coupon_accepts_valid_code_case_insensitively() {
    let app = TestApp::spawn().await;
    seed_coupon(&app, "SPRING20", 10).await;
    app.seed_user("fan@xtaze.test", UserRole::User).await;
    let token = app.login("user", "fan@xtaze.test").await;

    let (status, body) = verify(&app, &token, " spring20 ").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["code"], "SPRING20");
    assert_eq!(body["data"]["discount"], 20);
}

#[tokio::test]
async fn test_verify_coupon_rejections() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("fan@xtaze.test", UserRole::User).await;
    let token = app.login("user", "fan@xtaze.test").await;

    let (status, body) = verify(&app, &token, "NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invalid coupon code");

    // 用尽或过期后状态在落库时派生为 expired
    let exhausted = seed_coupon(&app, "USEDUP", 1).await;
    let stored = app.coupons.record_usage(exhausted.id, Uuid::new_v4()).await.unwrap();
    assert_eq!(stored.status, CouponStatus::Expired);
    let (status, body) = verify(&app, &token, "USEDUP").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Coupon is not active");

    let mut stale = seed_coupon(&app, "OLD", 5).await;
    stale.expires = (Utc::now() - Duration::days(1)).fixed_offset();
    app.coupons.update(&stale).await.unwrap();
    let (status, _) = verify(&app, &token, "OLD").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut paused = seed_coupon(&app, "PAUSED", 5).await;
    paused.status = CouponStatus::Inactive;
    app.coupons.update(&paused).await.unwrap();
    let (_, body) = verify(&app, &token, "PAUSED").await;
    assert_eq!(body["message"], "Coupon is not active");

    let used = seed_coupon(&app, "ONCE", 5).await;
    app.coupons.record_usage(used.id, user.id).await.unwrap();
    let (status, body) = verify(&app, &token, "ONCE").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You have already used this coupon");
}

#[tokio::test]
async fn test_public_plan_listing() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/v1/prices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [monthly_price()],
            "has_more": false
        })))
        .mount(&app.external)
        .await;

    let response = app.server.get("/user/plans").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"][0]["priceId"], "price_monthly");
    assert_eq!(body["data"][0]["name"], "Premium");
}

#[tokio::test]
async fn test_checkout_with_coupon_creates_stripe_discount() {
    let app = TestApp::spawn().await;
    seed_coupon(&app, "SPRING20", 10).await;
    app.seed_user("fan@xtaze.test", UserRole::User).await;
    let token = app.login("user", "fan@xtaze.test").await;

    Mock::given(method("GET"))
        .and(path("/v1/prices/price_monthly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(monthly_price()))
        .mount(&app.external)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/coupons"))
        .and(body_string_contains("percent_off=20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "stripe_coupon_1" })))
        .expect(1)
        .mount(&app.external)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains("mode=subscription"))
        .and(body_string_contains("stripe_coupon_1"))
        .and(body_string_contains("metadata%5BcouponCode%5D=SPRING20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_sub_1",
            "url": "https://checkout.stripe.test/cs_sub_1"
        })))
        .expect(1)
        .mount(&app.external)
        .await;

    let response = app
        .server
        .post("/user/checkout")
        .authorization_bearer(&token)
        .json(&json!({ "priceId": "price_monthly", "couponCode": "spring20" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["sessionId"], "cs_sub_1");
    assert_eq!(body["data"]["url"], "https://checkout.stripe.test/cs_sub_1");
}

#[tokio::test]
async fn test_checkout_unknown_plan_is_not_found() {
    let app = TestApp::spawn().await;
    app.seed_user("fan@xtaze.test", UserRole::User).await;
    let token = app.login("user", "fan@xtaze.test").await;
    Mock::given(method("GET"))
        .and(path("/v1/prices/price_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "message": "No such price: 'price_missing'" }
        })))
        .mount(&app.external)
        .await;

    let response = app
        .server
        .post("/user/checkout")
        .authorization_bearer(&token)
        .json(&json!({ "priceId": "price_missing" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_subscription_clears_premium() {
    let app = TestApp::spawn().await;
    let mut user = app.seed_user("fan@xtaze.test", UserRole::User).await;
    user.premium = Some("Premium".to_string());
    user.premium_expires_at = Some((Utc::now() + Duration::days(30)).fixed_offset());
    user.stripe_subscription_id = Some("sub_123".to_string());
    app.users.update(&user).await.unwrap();
    let token = app.login("user", "fan@xtaze.test").await;

    Mock::given(method("DELETE"))
        .and(path("/v1/subscriptions/sub_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sub_123",
            "status": "canceled"
        })))
        .expect(1)
        .mount(&app.external)
        .await;

    let response = app
        .server
        .post("/user/subscription/cancel")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let stored = app.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.premium.is_none());
    assert!(stored.stripe_subscription_id.is_none());

    let again = app
        .server
        .post("/user/subscription/cancel")
        .authorization_bearer(&token)
        .await;
    assert_eq!(again.status_code(), StatusCode::BAD_REQUEST);
}
