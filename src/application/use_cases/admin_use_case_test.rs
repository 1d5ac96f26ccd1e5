// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use crate::application::dto::verification_dto::ReviewDecision;
use crate::application::use_cases::test_support::{upload, TestContext, TEST_PASSWORD};
use chrono::Duration;

fn coupon_request(code: &str) -> CreateCouponRequest {
    CreateCouponRequest {
        code: code.to_string(),
        discount: 15,
        expires: Utc::now() + Duration::days(30),
        max_uses: 100,
    }
}

#[tokio::test]
async fn test_toggle_ban_blocks_login_but_never_admins() {
    let ctx = TestContext::new().await;
    let admin = ctx.seed_user("admin@xtaze.test", UserRole::Admin).await;
    let user = ctx.seed_user("fan@xtaze.test", UserRole::User).await;

    let banned = ctx.admin.toggle_ban(user.id).await.unwrap();
    assert!(!banned.is_active);
    let err = ctx
        .users
        .login(LoginRequest {
            email: "fan@xtaze.test".to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    assert!(ctx.admin.toggle_ban(user.id).await.unwrap().is_active);

    let err = ctx.admin.toggle_ban(admin.id).await.unwrap_err();
    assert_eq!(err.to_string(), "Admins cannot be banned");
}

#[tokio::test]
async fn test_create_coupon_rejects_duplicate_code() {
    let ctx = TestContext::new().await;
    let coupon = ctx.admin.create_coupon(coupon_request("summer")).await.unwrap();
    assert_eq!(coupon.code, "SUMMER");

    let err = ctx.admin.create_coupon(coupon_request("SUMMER")).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ref m) if m == "Coupon code already exists"));

    let mut past = coupon_request("PAST");
    past.expires = Utc::now() - Duration::days(1);
    let err = ctx.admin.create_coupon(past).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn test_update_coupon_status_and_code() {
    let ctx = TestContext::new().await;
    let first = ctx.admin.create_coupon(coupon_request("FIRST")).await.unwrap();
    ctx.admin.create_coupon(coupon_request("SECOND")).await.unwrap();

    let err = ctx
        .admin
        .update_coupon(
            first.id,
            UpdateCouponRequest {
                code: Some("second".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let updated = ctx
        .admin
        .update_coupon(
            first.id,
            UpdateCouponRequest {
                status: Some(CouponStatus::Inactive),
                discount: Some(50),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, CouponStatus::Inactive);
    assert_eq!(updated.discount, 50);

    let err = ctx
        .admin
        .update_coupon(
            first.id,
            UpdateCouponRequest {
                status: Some(CouponStatus::Expired),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    ctx.admin.delete_coupon(first.id).await.unwrap();
    assert_eq!(ctx.admin.coupons(&PageQuery::default()).await.unwrap().total, 1);
}

#[tokio::test]
async fn test_banner_lifecycle() {
    let ctx = TestContext::new().await;
    let admin = ctx.seed_user("admin@xtaze.test", UserRole::Admin).await;

    let err = ctx
        .admin
        .create_banner(
            admin.id,
            CreateBannerRequest {
                title: "No image".to_string(),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let banner = ctx
        .admin
        .create_banner(
            admin.id,
            CreateBannerRequest {
                title: "Launch".to_string(),
                description: Some("New album".to_string()),
                action: Some("/albums".to_string()),
            },
            Some(upload("banner.jpg")),
        )
        .await
        .unwrap();
    assert!(banner.image_url.starts_with("memory://banners/"));

    let hidden = ctx
        .admin
        .update_banner(
            banner.id,
            UpdateBannerRequest {
                is_active: Some(false),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert!(!hidden.is_active);
    assert!(ctx.users.active_banners().await.unwrap().is_empty());

    ctx.admin.delete_banner(banner.id).await.unwrap();
    assert_eq!(ctx.admin.banners(&PageQuery::default()).await.unwrap().total, 0);
}

#[tokio::test]
async fn test_review_verification_once() {
    let ctx = TestContext::new().await;
    let artist = ctx.seed_user("artist@xtaze.test", UserRole::Artist).await;
    ctx.artists
        .submit_verification(artist.id, Some(upload("passport.pdf")))
        .await
        .unwrap();

    let pending = ctx
        .admin
        .verification_requests(&VerificationQuery {
            status: Some(VerificationStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.total, 1);
    let request = &pending.items[0];
    assert_eq!(request.artist_email.as_deref(), Some("artist@xtaze.test"));

    let reviewed = ctx
        .admin
        .review_verification(
            request.id,
            ReviewVerificationRequest {
                decision: ReviewDecision::Reject,
                feedback: Some("Blurry photo".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(reviewed.status, VerificationStatus::Rejected);
    assert!(reviewed.reviewed_at.is_some());

    let err = ctx
        .admin
        .review_verification(
            request.id,
            ReviewVerificationRequest {
                decision: ReviewDecision::Approve,
                feedback: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let status = ctx.artists.verification_status(artist.id).await.unwrap();
    assert_eq!(status.feedback.as_deref(), Some("Blurry photo"));
}

#[tokio::test]
async fn test_plans_are_created_in_cents_and_archived() {
    let ctx = TestContext::new().await;
    let plan = ctx
        .admin
        .create_plan(CreatePlanRequest {
            name: "Premium".to_string(),
            description: None,
            price: 4.99,
            interval: Default::default(),
        })
        .await
        .unwrap();
    assert_eq!(plan.amount, 499);
    assert_eq!(plan.currency, "usd");

    let updated = ctx
        .admin
        .update_plan(
            &plan.price_id,
            UpdatePlanRequest {
                price: Some(5.99),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, 599);

    ctx.admin.archive_plan(&plan.price_id).await.unwrap();
    assert!(ctx.admin.plans().await.unwrap().is_empty());

    let err = ctx
        .admin
        .archive_plan("price_missing")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_dashboard_and_music_monetization() {
    let ctx = TestContext::new().await;
    let artist = ctx.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let listener = ctx.seed_user("fan@xtaze.test", UserRole::User).await;
    ctx.seed_user("fan2@xtaze.test", UserRole::User).await;
    let track = ctx.seed_track(artist.id, "Hit", &["Pop"]).await;
    ctx.tracks.increment_play(track.id, listener.id).await.unwrap();
    ctx.tracks.increment_play(track.id, listener.id).await.unwrap();

    let dashboard = ctx.admin.dashboard().await.unwrap();
    assert_eq!(dashboard.total_users, 2);
    assert_eq!(dashboard.total_artists, 1);
    assert_eq!(dashboard.premium_users, 0);
    assert_eq!(dashboard.total_tracks, 1);
    assert_eq!(dashboard.monthly_plays, 2);

    let page = ctx.admin.music_monetization(&PageQuery::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].monthly_plays, 2);
    assert!((page.items[0].monthly_revenue - 1.0).abs() < f64::EPSILON);
}
