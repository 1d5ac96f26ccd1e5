// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::monetization::TrackMonetization;
use crate::domain::models::payment::{BillingInterval, CheckoutSession};

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "Price ID is required"))]
    pub price_id: String,
    pub coupon_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
    pub url: Option<String>,
}

impl From<CheckoutSession> for CheckoutResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            session_id: session.id,
            url: session.url,
        }
    }
}

/// 新建订阅套餐，价格单位为美元
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "Plan name is required"))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0.5, max = 10000.0, message = "Price must be between 0.5 and 10000"))]
    pub price: f64,
    #[serde(default)]
    pub interval: BillingInterval,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "Plan name is required"))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0.5, max = 10000.0, message = "Price must be between 0.5 and 10000"))]
    pub price: Option<f64>,
    pub interval: Option<BillingInterval>,
}

pub fn dollars_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// 艺术家收益汇总
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistMonetizationDto {
    /// 当前计费月份，例如 "2025-03"
    pub period: String,
    /// 单次播放收益（美元）
    pub per_play_rate: f64,
    pub total_plays: i64,
    pub monthly_plays: i64,
    pub total_revenue: f64,
    pub monthly_revenue: f64,
    pub tracks: Vec<TrackMonetization>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutDto {
    pub session_id: String,
    pub url: Option<String>,
    /// 美分
    pub amount: i64,
    pub monthly_plays: i64,
    pub period: String,
}
