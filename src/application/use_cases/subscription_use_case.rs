// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::payment_dto::{
    dollars_to_cents, CheckoutRequest, CheckoutResponse, CreatePlanRequest, PayoutDto,
    UpdatePlanRequest,
};
use crate::application::dto::promotion_dto::{CouponCheckDto, CouponCodeRequest};
use crate::application::dto::user_dto::UserDto;
use crate::config::settings::Settings;
use crate::domain::models::coupon::{normalize_code, Coupon};
use crate::domain::models::payment::{
    BillingInterval, CheckoutKind, PaymentCheckout, PaymentEvent, Plan, SubscriptionCheckout,
};
use crate::domain::models::track::BillingPeriod;
use crate::domain::models::user::User;
use crate::domain::repositories::coupon_repository::CouponRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::payment_gateway::{NewPlan, PaymentGateway, PlanChanges};
use crate::infrastructure::metrics;
use crate::utils::errors::{DomainError, DomainResult};

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";
pub const SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";

/// 结算相关配置
#[derive(Debug, Clone)]
pub struct BillingOptions {
    /// 前端地址，支付完成后回跳
    pub client_url: String,
    pub currency: String,
    /// 单次播放收益（美分）
    pub per_play_cents: i64,
}

impl BillingOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            client_url: settings.server.client_url.trim_end_matches('/').to_string(),
            currency: settings.stripe.currency.clone(),
            per_play_cents: settings.monetization.per_play_cents,
        }
    }
}

/// 订阅与结算用例
///
/// 套餐管理、订阅结算、艺术家提现与 Stripe 回调都经过这里
pub struct SubscriptionUseCase {
    users: Arc<dyn UserRepository>,
    coupons: Arc<dyn CouponRepository>,
    payments: Arc<dyn PaymentGateway>,
    options: BillingOptions,
}

impl SubscriptionUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        coupons: Arc<dyn CouponRepository>,
        payments: Arc<dyn PaymentGateway>,
        options: BillingOptions,
    ) -> Self {
        Self {
            users,
            coupons,
            payments,
            options,
        }
    }

    pub fn options(&self) -> &BillingOptions {
        &self.options
    }

    /// 在售套餐
    pub async fn plans(&self) -> DomainResult<Vec<Plan>> {
        let plans = self.payments.list_plans().await?;
        Ok(plans.into_iter().filter(|plan| plan.active).collect())
    }

    pub async fn create_plan(&self, dto: CreatePlanRequest) -> DomainResult<Plan> {
        dto.validate()?;
        let plan = self
            .payments
            .create_plan(NewPlan {
                name: dto.name.trim().to_string(),
                description: dto.description.filter(|d| !d.trim().is_empty()),
                amount: dollars_to_cents(dto.price),
                currency: self.options.currency.clone(),
                interval: dto.interval,
            })
            .await?;
        info!("Created plan {} ({})", plan.name, plan.price_id);
        Ok(plan)
    }

    pub async fn update_plan(&self, price_id: &str, dto: UpdatePlanRequest) -> DomainResult<Plan> {
        dto.validate()?;
        self.find_plan(price_id).await?;
        let changes = PlanChanges {
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto.description,
            amount: dto.price.map(dollars_to_cents),
            interval: dto.interval,
        };
        self.payments.update_plan(price_id, changes).await
    }

    pub async fn archive_plan(&self, price_id: &str) -> DomainResult<()> {
        self.find_plan(price_id).await?;
        self.payments.archive_plan(price_id).await?;
        info!("Archived plan {}", price_id);
        Ok(())
    }

    /// 校验优惠券能否被该用户使用
    ///
    /// 依次检查状态、使用次数、到期时间，最后检查是否已用过
    pub async fn validate_coupon(&self, code: &str, user_id: Uuid) -> DomainResult<Coupon> {
        let coupon = self
            .coupons
            .find_by_code(&normalize_code(code))
            .await?
            .ok_or_else(|| DomainError::NotFound("Invalid coupon code".to_string()))?;

        coupon
            .check_redeemable(user_id, Utc::now())
            .map_err(|rejection| DomainError::Validation(rejection.to_string()))?;
        Ok(coupon)
    }

    pub async fn verify_coupon(&self, user_id: Uuid, dto: CouponCodeRequest) -> DomainResult<CouponCheckDto> {
        dto.validate()?;
        let coupon = self.validate_coupon(&dto.code, user_id).await?;
        Ok(CouponCheckDto {
            code: coupon.code,
            discount: coupon.discount,
            expires: coupon.expires,
        })
    }

    /// 创建订阅结算会话，折扣券在 Stripe 侧生成一次性折扣
    pub async fn checkout(&self, user_id: Uuid, dto: CheckoutRequest) -> DomainResult<CheckoutResponse> {
        dto.validate()?;
        let user = self.load_user(user_id).await?;
        if user.is_premium() && user.stripe_subscription_id.is_some() {
            return Err(DomainError::Conflict(
                "You already have an active subscription".to_string(),
            ));
        }

        let plan = self
            .payments
            .retrieve_plan(&dto.price_id)
            .await?
            .filter(|plan| plan.active)
            .ok_or_else(|| DomainError::NotFound("Plan not found".to_string()))?;

        let mut metadata = HashMap::from([
            ("kind".to_string(), CheckoutKind::Subscription.to_string()),
            ("userId".to_string(), user.id.to_string()),
            ("priceId".to_string(), plan.price_id.clone()),
            ("planName".to_string(), plan.name.clone()),
            ("interval".to_string(), plan.interval.to_string()),
        ]);

        let mut discount_coupon = None;
        if let Some(code) = dto.coupon_code.as_deref().filter(|c| !c.trim().is_empty()) {
            let coupon = self.validate_coupon(code, user.id).await?;
            discount_coupon = Some(self.payments.create_discount(coupon.discount).await?);
            metadata.insert("couponCode".to_string(), coupon.code);
        }

        let session = self
            .payments
            .create_subscription_checkout(SubscriptionCheckout {
                price_id: plan.price_id,
                customer_email: user.email,
                discount_coupon,
                success_url: format!(
                    "{}/payment/success?session_id={{CHECKOUT_SESSION_ID}}",
                    self.options.client_url
                ),
                cancel_url: format!("{}/payment/cancel", self.options.client_url),
                metadata,
            })
            .await?;

        metrics::record_checkout();
        info!("Checkout session {} created for {}", session.id, user_id);
        Ok(session.into())
    }

    /// 取消订阅，本地会员状态立即清除
    pub async fn cancel_subscription(&self, user_id: Uuid) -> DomainResult<UserDto> {
        let mut user = self.load_user(user_id).await?;
        let subscription_id = user
            .stripe_subscription_id
            .clone()
            .ok_or_else(|| DomainError::Validation("No active subscription".to_string()))?;

        self.payments.cancel_subscription(&subscription_id).await?;
        clear_premium(&mut user);
        info!("Subscription {} cancelled by {}", subscription_id, user_id);
        Ok(self.users.update(&user).await?.into())
    }

    /// 创建艺术家提现结算会话，金额 = 当月播放数 * 单次播放收益
    pub async fn payout_checkout(
        &self,
        artist: &User,
        monthly_plays: i64,
        period: BillingPeriod,
    ) -> DomainResult<PayoutDto> {
        if monthly_plays <= 0 {
            return Err(DomainError::Validation(
                "No revenue to payout for this month".to_string(),
            ));
        }
        let amount = monthly_plays * self.options.per_play_cents;

        let metadata = HashMap::from([
            ("kind".to_string(), CheckoutKind::Payout.to_string()),
            ("artistId".to_string(), artist.id.to_string()),
            ("period".to_string(), period.label()),
            ("monthlyPlays".to_string(), monthly_plays.to_string()),
        ]);
        let session = self
            .payments
            .create_payment_checkout(PaymentCheckout {
                product_name: format!("Xtaze payout {} ({})", period.label(), artist.name),
                amount,
                currency: self.options.currency.clone(),
                success_url: format!("{}/artist/monetization?payout=success", self.options.client_url),
                cancel_url: format!("{}/artist/monetization?payout=cancel", self.options.client_url),
                metadata,
            })
            .await?;

        metrics::record_payout();
        info!(
            "Payout session {} for artist {}: {} plays, {} cents",
            session.id, artist.id, monthly_plays, amount
        );
        Ok(PayoutDto {
            session_id: session.id,
            url: session.url,
            amount,
            monthly_plays,
            period: period.label(),
        })
    }

    /// 处理 Stripe 回调
    ///
    /// 签名校验失败返回 Validation；无法关联到用户的事件只记录日志
    pub async fn handle_webhook(&self, payload: &[u8], signature: Option<&str>) -> DomainResult<()> {
        let signature = signature
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DomainError::Validation("Missing Stripe-Signature header".to_string()))?;
        let event = self.payments.verify_webhook(payload, signature)?;
        metrics::record_webhook(&event.event_type);

        match event.event_type.as_str() {
            CHECKOUT_COMPLETED => self.on_checkout_completed(&event).await,
            SUBSCRIPTION_DELETED => self.on_subscription_deleted(&event).await,
            other => {
                debug!("Ignoring webhook event {} ({})", event.id, other);
                Ok(())
            }
        }
    }

    async fn on_checkout_completed(&self, event: &PaymentEvent) -> DomainResult<()> {
        let object = &event.data.object;
        match metadata_str(object, "kind") {
            Some("subscription") => self.activate_subscription(object).await,
            Some("payout") => {
                let amount = object.get("amount_total").and_then(Value::as_i64);
                info!(
                    "Payout completed for artist {} ({} plays in {}), amount {:?}",
                    metadata_str(object, "artistId").unwrap_or("unknown"),
                    metadata_str(object, "monthlyPlays").unwrap_or("0"),
                    metadata_str(object, "period").unwrap_or("unknown"),
                    amount,
                );
                Ok(())
            }
            other => {
                warn!("Checkout {} completed with unknown kind {:?}", event.id, other);
                Ok(())
            }
        }
    }

    async fn activate_subscription(&self, object: &Value) -> DomainResult<()> {
        let Some(user_id) = metadata_str(object, "userId").and_then(|id| Uuid::parse_str(id).ok()) else {
            warn!("Subscription checkout without a valid userId");
            return Ok(());
        };
        let Some(mut user) = self.users.find_by_id(user_id).await? else {
            warn!("Subscription checkout for unknown user {}", user_id);
            return Ok(());
        };

        let interval = match metadata_str(object, "interval") {
            Some("year") => BillingInterval::Year,
            _ => BillingInterval::Month,
        };
        let now = Utc::now();
        let expires_at = match interval {
            BillingInterval::Month => now + Duration::days(30),
            BillingInterval::Year => now + Duration::days(365),
        };

        user.premium = Some(metadata_str(object, "planName").unwrap_or("Premium").to_string());
        user.premium_expires_at = Some(expires_at.fixed_offset());
        user.stripe_subscription_id = object
            .get("subscription")
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(customer) = object.get("customer").and_then(Value::as_str) {
            user.stripe_customer_id = Some(customer.to_string());
        }
        user.updated_at = now.fixed_offset();
        self.users.update(&user).await?;
        info!("User {} upgraded to {:?}", user.id, user.premium);

        if let Some(code) = metadata_str(object, "couponCode") {
            match self.coupons.find_by_code(&normalize_code(code)).await? {
                Some(coupon) => {
                    let coupon = self.coupons.record_usage(coupon.id, user.id).await?;
                    debug!("Coupon {} used {}/{} times", coupon.code, coupon.uses, coupon.max_uses);
                }
                None => warn!("Coupon {} from checkout no longer exists", code),
            }
        }
        Ok(())
    }

    async fn on_subscription_deleted(&self, event: &PaymentEvent) -> DomainResult<()> {
        let Some(subscription_id) = event.data.object.get("id").and_then(Value::as_str) else {
            warn!("Subscription deletion event {} without id", event.id);
            return Ok(());
        };
        match self.users.find_by_subscription_id(subscription_id).await? {
            Some(mut user) => {
                clear_premium(&mut user);
                self.users.update(&user).await?;
                info!("Subscription {} ended for {}", subscription_id, user.id);
            }
            None => debug!("No user owns subscription {}", subscription_id),
        }
        Ok(())
    }

    async fn find_plan(&self, price_id: &str) -> DomainResult<Plan> {
        self.payments
            .retrieve_plan(price_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Plan not found".to_string()))
    }

    async fn load_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()))
    }
}

fn clear_premium(user: &mut User) {
    user.premium = None;
    user.premium_expires_at = None;
    user.stripe_subscription_id = None;
    user.updated_at = Utc::now().fixed_offset();
}

fn metadata_str<'a>(object: &'a Value, key: &str) -> Option<&'a str> {
    object.get("metadata")?.get(key)?.as_str()
}

#[cfg(test)]
#[path = "subscription_use_case_test.rs"]
mod tests;
