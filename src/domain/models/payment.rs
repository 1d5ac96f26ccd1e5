// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 订阅套餐（Stripe 产品 + 周期价格）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub price_id: String,
    pub product_id: String,
    pub name: String,
    pub description: Option<String>,
    /// 单价（美分）
    pub amount: i64,
    pub currency: String,
    pub interval: BillingInterval,
    pub active: bool,
}

/// 计费周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    #[default]
    Month,
    Year,
}

impl fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BillingInterval::Month => write!(f, "month"),
            BillingInterval::Year => write!(f, "year"),
        }
    }
}

/// 结算会话的用途，写入会话 metadata 的 `kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutKind {
    Subscription,
    Payout,
}

impl fmt::Display for CheckoutKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CheckoutKind::Subscription => write!(f, "subscription"),
            CheckoutKind::Payout => write!(f, "payout"),
        }
    }
}

/// 订阅结算请求
#[derive(Debug, Clone)]
pub struct SubscriptionCheckout {
    pub price_id: String,
    pub customer_email: String,
    /// Stripe 侧的一次性折扣券 ID
    pub discount_coupon: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: HashMap<String, String>,
}

/// 一次性付款结算请求（艺术家收益提现）
#[derive(Debug, Clone)]
pub struct PaymentCheckout {
    pub product_name: String,
    /// 金额（美分）
    pub amount: i64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: HashMap<String, String>,
}

/// 已创建的结算会话
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
    pub amount_total: Option<i64>,
}

/// 已验签的 Webhook 事件
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: PaymentEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEventData {
    pub object: serde_json::Value,
}
