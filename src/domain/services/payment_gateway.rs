// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::domain::models::payment::{
    BillingInterval, CheckoutSession, PaymentCheckout, PaymentEvent, Plan, SubscriptionCheckout,
};
use crate::utils::errors::DomainResult;

/// 新建订阅计划的参数
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub name: String,
    pub description: Option<String>,
    /// 最小货币单位
    pub amount: i64,
    pub currency: String,
    pub interval: BillingInterval,
}

/// 订阅计划的修改项
#[derive(Debug, Clone, Default)]
pub struct PlanChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub interval: Option<BillingInterval>,
}

impl PlanChanges {
    /// 价格一旦创建不可修改，金额或周期变化时需要新建价格
    pub fn requires_new_price(&self, current: &Plan) -> bool {
        self.amount.is_some_and(|amount| amount != current.amount)
            || self.interval.is_some_and(|interval| interval != current.interval)
    }
}

/// 支付网关特质
///
/// 计划只保存在支付服务商处，以价格 ID 标识
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// 创建商品和循环价格
    async fn create_plan(&self, plan: NewPlan) -> DomainResult<Plan>;

    /// 所有启用中的循环价格
    async fn list_plans(&self) -> DomainResult<Vec<Plan>>;

    async fn retrieve_plan(&self, price_id: &str) -> DomainResult<Option<Plan>>;

    /// 返回修改后的计划，价格 ID 可能发生变化
    async fn update_plan(&self, price_id: &str, changes: PlanChanges) -> DomainResult<Plan>;

    /// 停用价格和商品
    async fn archive_plan(&self, price_id: &str) -> DomainResult<()>;

    /// 创建一次性百分比折扣，返回服务商的折扣 ID
    async fn create_discount(&self, percent_off: i32) -> DomainResult<String>;

    async fn create_subscription_checkout(
        &self,
        checkout: SubscriptionCheckout,
    ) -> DomainResult<CheckoutSession>;

    async fn create_payment_checkout(
        &self,
        checkout: PaymentCheckout,
    ) -> DomainResult<CheckoutSession>;

    async fn cancel_subscription(&self, subscription_id: &str) -> DomainResult<()>;

    /// 校验回调签名并解析事件
    fn verify_webhook(&self, payload: &[u8], signature: &str) -> DomainResult<PaymentEvent>;
}
