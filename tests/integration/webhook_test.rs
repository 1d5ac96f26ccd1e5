// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{signed_at, stripe_signature, TestApp, WEBHOOK_SECRET};
use axum::body::Bytes;
use axum::http::{HeaderName, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use xtaze::domain::models::coupon::Coupon;
use xtaze::domain::models::user::{User, UserRole};
use xtaze::domain::repositories::coupon_repository::CouponRepository;
use xtaze::domain::repositories::user_repository::UserRepository;

const SIGNATURE: HeaderName = HeaderName::from_static("stripe-signature");

fn checkout_completed(user: &User, interval: &str, coupon: Option<&str>) -> Vec<u8> {
    let mut metadata = json!({
        "kind": "subscription",
        "userId": user.id.to_string(),
        "planName": "Premium",
        "interval": interval,
    });
    if let Some(code) = coupon {
        metadata["couponCode"] = json!(code);
    }
    serde_json::to_vec(&json!({
        "id": "evt_checkout_1",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": "cs_test_1",
                "metadata": metadata,
                "subscription": "sub_test_1",
                "customer": "cus_test_1"
            }
        }
    }))
    .unwrap()
}

#[tokio::test]
async fn test_missing_signature_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post("/webhook")
        .bytes(Bytes::from_static(b"{}"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Missing Stripe-Signature header");
}

#[tokio::test]
async fn test_signature_with_wrong_secret_is_rejected() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("fan@xtaze.test", UserRole::User).await;
    let payload = checkout_completed(&user, "month", None);

    let response = app
        .server
        .post("/webhook")
        .add_header(SIGNATURE, stripe_signature("whsec_wrong", &payload))
        .bytes(Bytes::from(payload))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let stored = app.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.premium.is_none());
}

#[tokio::test]
async fn test_stale_timestamp_is_rejected() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("fan@xtaze.test", UserRole::User).await;
    let payload = checkout_completed(&user, "month", None);
    let an_hour_ago = (Utc::now() - Duration::hours(1)).timestamp();

    let response = app
        .server
        .post("/webhook")
        .add_header(SIGNATURE, signed_at(WEBHOOK_SECRET, an_hour_ago, &payload))
        .bytes(Bytes::from(payload))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Webhook timestamp outside the tolerance zone");
}

/// 订阅结算完成：用户升级为会员并记录优惠券使用
#[tokio::test]
async fn test_completed_subscription_upgrades_user_and_records_coupon() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("fan@xtaze.test", UserRole::User).await;
    let expires = (Utc::now() + Duration::days(10)).fixed_offset();
    app.coupons
        .create(&Coupon::new("WELCOME", 15, expires, 3))
        .await
        .unwrap();
    let payload = checkout_completed(&user, "year", Some("WELCOME"));

    let response = app
        .server
        .post("/webhook")
        .add_header(SIGNATURE, stripe_signature(WEBHOOK_SECRET, &payload))
        .bytes(Bytes::from(payload))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["received"], true);

    let stored = app.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.premium.as_deref(), Some("Premium"));
    assert_eq!(stored.stripe_subscription_id.as_deref(), Some("sub_test_1"));
    assert_eq!(stored.stripe_customer_id.as_deref(), Some("cus_test_1"));
    let days_left = (stored.premium_expires_at.unwrap().with_timezone(&Utc) - Utc::now()).num_days();
    assert!((364..=365).contains(&days_left));

    let coupon = app.coupons.find_by_code("WELCOME").await.unwrap().unwrap();
    assert_eq!(coupon.uses, 1);
    assert_eq!(coupon.users, vec![user.id]);
}

#[tokio::test]
async fn test_subscription_deleted_clears_premium() {
    let app = TestApp::spawn().await;
    let mut user = app.seed_user("fan@xtaze.test", UserRole::User).await;
    user.premium = Some("Premium".to_string());
    user.premium_expires_at = Some((Utc::now() + Duration::days(30)).fixed_offset());
    user.stripe_subscription_id = Some("sub_gone".to_string());
    app.users.update(&user).await.unwrap();

    let payload = serde_json::to_vec(&json!({
        "id": "evt_deleted_1",
        "type": "customer.subscription.deleted",
        "data": { "object": { "id": "sub_gone" } }
    }))
    .unwrap();

    let response = app
        .server
        .post("/webhook")
        .add_header(SIGNATURE, stripe_signature(WEBHOOK_SECRET, &payload))
        .bytes(Bytes::from(payload))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let stored = app.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.premium.is_none());
    assert!(stored.premium_expires_at.is_none());
}

#[tokio::test]
async fn test_unrelated_events_are_acknowledged() {
    let app = TestApp::spawn().await;
    let payload = serde_json::to_vec(&json!({
        "id": "evt_other",
        "type": "invoice.paid",
        "data": { "object": { "id": "in_1" } }
    }))
    .unwrap();

    let response = app
        .server
        .post("/webhook")
        .add_header(SIGNATURE, stripe_signature(WEBHOOK_SECRET, &payload))
        .bytes(Bytes::from(payload))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}
