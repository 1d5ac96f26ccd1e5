// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use crate::application::use_cases::test_support::{TestContext, PER_PLAY_CENTS, VALID_SIGNATURE};
use crate::domain::models::user::UserRole;
use crate::domain::repositories::coupon_repository::CouponRepository;
use crate::domain::repositories::user_repository::UserRepository;
use serde_json::json;

async fn seed_coupon(ctx: &TestContext, code: &str, expires_in_days: i64, max_uses: i32) -> Coupon {
    let expires = (Utc::now() + Duration::days(expires_in_days)).fixed_offset();
    ctx.coupon_repo
        .create(&Coupon::new(code, 20, expires, max_uses))
        .await
        .unwrap()
}

fn code(code: &str) -> CouponCodeRequest {
    CouponCodeRequest {
        code: code.to_string(),
    }
}

#[tokio::test]
async fn test_verify_coupon_accepts_valid_code_case_insensitively() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("fan@xtaze.test", UserRole::User).await;
    seed_coupon(&ctx, "SPRING20", 10, 5).await;

    let check = ctx.subscriptions.verify_coupon(user.id, code(" spring20 ")).await.unwrap();
    assert_eq!(check.code, "SPRING20");
    assert_eq!(check.discount, 20);
}

#[tokio::test]
async fn test_verify_coupon_rejects_exhausted_expired_and_reused() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("fan@xtaze.test", UserRole::User).await;
    let other = ctx.seed_user("other@xtaze.test", UserRole::User).await;

    let exhausted = seed_coupon(&ctx, "ONCE", 10, 1).await;
    ctx.coupon_repo.record_usage(exhausted.id, other.id).await.unwrap();
    let err = ctx.subscriptions.verify_coupon(user.id, code("ONCE")).await.unwrap_err();
    // 用尽的券在读取时已被推导为 expired
    assert!(matches!(err, DomainError::Validation(_)));

    seed_coupon(&ctx, "OLD", -1, 10).await;
    let err = ctx.subscriptions.verify_coupon(user.id, code("OLD")).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let reusable = seed_coupon(&ctx, "TWICE", 10, 10).await;
    ctx.coupon_repo.record_usage(reusable.id, user.id).await.unwrap();
    let err = ctx.subscriptions.verify_coupon(user.id, code("TWICE")).await.unwrap_err();
    assert_eq!(err.to_string(), "You have already used this coupon");

    let err = ctx.subscriptions.verify_coupon(user.id, code("MISSING")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_checkout_with_coupon_creates_discount_and_metadata() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("fan@xtaze.test", UserRole::User).await;
    let plan = ctx.seed_plan("Premium", 999).await;
    seed_coupon(&ctx, "SAVE20", 10, 5).await;

    let response = ctx
        .subscriptions
        .checkout(
            user.id,
            CheckoutRequest {
                price_id: plan.price_id.clone(),
                coupon_code: Some("save20".to_string()),
            },
        )
        .await
        .unwrap();
    assert!(response.url.is_some());

    assert_eq!(*ctx.payments.discounts.lock().unwrap(), vec![20]);
    let checkouts = ctx.payments.subscription_checkouts.lock().unwrap();
    let checkout = &checkouts[0];
    assert_eq!(checkout.price_id, plan.price_id);
    assert_eq!(checkout.customer_email, "fan@xtaze.test");
    assert_eq!(checkout.discount_coupon.as_deref(), Some("coupon_1"));
    assert_eq!(checkout.metadata["kind"], "subscription");
    assert_eq!(checkout.metadata["userId"], user.id.to_string());
    assert_eq!(checkout.metadata["couponCode"], "SAVE20");
    assert!(checkout.success_url.ends_with("session_id={CHECKOUT_SESSION_ID}"));
}

#[tokio::test]
async fn test_checkout_unknown_or_archived_plan_is_not_found() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("fan@xtaze.test", UserRole::User).await;
    let plan = ctx.seed_plan("Premium", 999).await;
    ctx.subscriptions.archive_plan(&plan.price_id).await.unwrap();

    let err = ctx
        .subscriptions
        .checkout(
            user.id,
            CheckoutRequest {
                price_id: plan.price_id,
                coupon_code: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
    assert!(ctx.subscriptions.plans().await.unwrap().is_empty());
}

fn checkout_completed(user_id: Uuid, coupon: Option<&str>) -> Vec<u8> {
    let mut metadata = json!({
        "kind": "subscription",
        "userId": user_id.to_string(),
        "planName": "Premium",
        "interval": "month",
    });
    if let Some(code) = coupon {
        metadata["couponCode"] = json!(code);
    }
    serde_json::to_vec(&json!({
        "id": "evt_1",
        "type": "checkout.session.completed",
        "data": { "object": {
            "id": "cs_1",
            "customer": "cus_1",
            "subscription": "sub_1",
            "metadata": metadata,
        }}
    }))
    .unwrap()
}

#[tokio::test]
async fn test_webhook_checkout_completed_activates_premium_and_records_coupon() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("fan@xtaze.test", UserRole::User).await;
    let coupon = seed_coupon(&ctx, "SAVE20", 10, 5).await;

    ctx.subscriptions
        .handle_webhook(&checkout_completed(user.id, Some("SAVE20")), Some(VALID_SIGNATURE))
        .await
        .unwrap();

    let stored = ctx.user_repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.premium.as_deref(), Some("Premium"));
    assert_eq!(stored.stripe_subscription_id.as_deref(), Some("sub_1"));
    assert_eq!(stored.stripe_customer_id.as_deref(), Some("cus_1"));
    assert!(stored.premium_expires_at.is_some());

    let coupon = ctx.coupon_repo.find_by_id(coupon.id).await.unwrap().unwrap();
    assert_eq!(coupon.uses, 1);
    assert_eq!(coupon.users, vec![user.id]);
}

/// 提现结算只记录日志，不改动任何账号
#[tokio::test]
async fn test_webhook_payout_completed_is_acknowledged() {
    let ctx = TestContext::new().await;
    let artist = ctx.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let payload = serde_json::to_vec(&json!({
        "id": "evt_payout",
        "type": "checkout.session.completed",
        "data": { "object": {
            "id": "cs_payout",
            "amount_total": 350,
            "metadata": {
                "kind": "payout",
                "artistId": artist.id.to_string(),
                "monthlyPlays": "7",
                "period": "2026-10",
            },
        }}
    }))
    .unwrap();

    ctx.subscriptions
        .handle_webhook(&payload, Some(VALID_SIGNATURE))
        .await
        .unwrap();

    let stored = ctx.user_repo.find_by_id(artist.id).await.unwrap().unwrap();
    assert!(stored.premium.is_none());
    assert!(stored.stripe_subscription_id.is_none());
}

#[tokio::test]
async fn test_webhook_subscription_deleted_clears_premium() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("fan@xtaze.test", UserRole::User).await;
    ctx.subscriptions
        .handle_webhook(&checkout_completed(user.id, None), Some(VALID_SIGNATURE))
        .await
        .unwrap();

    let payload = serde_json::to_vec(&json!({
        "id": "evt_2",
        "type": "customer.subscription.deleted",
        "data": { "object": { "id": "sub_1" } }
    }))
    .unwrap();
    ctx.subscriptions
        .handle_webhook(&payload, Some(VALID_SIGNATURE))
        .await
        .unwrap();

    let stored = ctx.user_repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.premium.is_none());
    assert!(stored.stripe_subscription_id.is_none());
}

#[tokio::test]
async fn test_webhook_rejects_bad_or_missing_signature() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("fan@xtaze.test", UserRole::User).await;
    let payload = checkout_completed(user.id, None);

    let err = ctx
        .subscriptions
        .handle_webhook(&payload, Some("t=1,v1=forged"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = ctx.subscriptions.handle_webhook(&payload, None).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let stored = ctx.user_repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.premium.is_none());
}

#[tokio::test]
async fn test_cancel_subscription_requires_one() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("fan@xtaze.test", UserRole::User).await;

    let err = ctx.subscriptions.cancel_subscription(user.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    ctx.subscriptions
        .handle_webhook(&checkout_completed(user.id, None), Some(VALID_SIGNATURE))
        .await
        .unwrap();
    let dto = ctx.subscriptions.cancel_subscription(user.id).await.unwrap();
    assert!(dto.premium.is_none());
    assert_eq!(*ctx.payments.cancelled.lock().unwrap(), vec!["sub_1".to_string()]);
}

#[tokio::test]
async fn test_payout_checkout_amount_in_cents() {
    let ctx = TestContext::new().await;
    let artist = ctx.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let period = BillingPeriod::current();

    let err = ctx
        .subscriptions
        .payout_checkout(&artist, 0, period)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No revenue to payout for this month");

    let payout = ctx.subscriptions.payout_checkout(&artist, 7, period).await.unwrap();
    assert_eq!(payout.amount, 7 * PER_PLAY_CENTS);
    let checkouts = ctx.payments.payment_checkouts.lock().unwrap();
    assert_eq!(checkouts[0].amount, 350);
    assert_eq!(checkouts[0].metadata["kind"], "payout");
}
