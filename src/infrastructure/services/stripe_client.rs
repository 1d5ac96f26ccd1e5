// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, warn};

use crate::config::settings::StripeSettings;
use crate::domain::models::payment::{
    BillingInterval, CheckoutSession, PaymentCheckout, PaymentEvent, Plan, SubscriptionCheckout,
};
use crate::domain::services::payment_gateway::{NewPlan, PaymentGateway, PlanChanges};
use crate::utils::errors::{DomainError, DomainResult};

type HmacSha256 = Hmac<Sha256>;

/// Stripe REST 客户端
///
/// 请求体使用表单编码，嵌套参数以 `a[b][c]` 形式展开
pub struct StripeClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
    webhook_secret: String,
    webhook_tolerance_seconds: i64,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct StripeObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeList<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct StripeProduct {
    id: String,
    name: String,
    description: Option<String>,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StripeProductRef {
    Expanded(StripeProduct),
    Id(String),
}

#[derive(Debug, Deserialize)]
struct StripeRecurring {
    interval: String,
}

#[derive(Debug, Deserialize)]
struct StripePrice {
    id: String,
    product: StripeProductRef,
    unit_amount: Option<i64>,
    currency: String,
    recurring: Option<StripeRecurring>,
    active: bool,
}

impl StripePrice {
    fn product_active(&self) -> bool {
        match &self.product {
            StripeProductRef::Expanded(product) => product.active,
            StripeProductRef::Id(_) => true,
        }
    }

    fn into_plan(self) -> Plan {
        let interval = match self.recurring.as_ref().map(|r| r.interval.as_str()) {
            Some("year") => BillingInterval::Year,
            _ => BillingInterval::Month,
        };
        let (product_id, name, description) = match self.product {
            StripeProductRef::Expanded(product) => (product.id, product.name, product.description),
            StripeProductRef::Id(id) => (id, String::new(), None),
        };

        Plan {
            price_id: self.id,
            product_id,
            name,
            description,
            amount: self.unit_amount.unwrap_or_default(),
            currency: self.currency,
            interval,
            active: self.active,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    url: Option<String>,
    amount_total: Option<i64>,
}

impl From<StripeCheckoutSession> for CheckoutSession {
    fn from(session: StripeCheckoutSession) -> Self {
        Self {
            id: session.id,
            url: session.url,
            amount_total: session.amount_total,
        }
    }
}

type FormParams = Vec<(String, String)>;

fn push(params: &mut FormParams, key: impl Into<String>, value: impl ToString) {
    params.push((key.into(), value.to_string()));
}

fn push_metadata(params: &mut FormParams, prefix: &str, metadata: &HashMap<String, String>) {
    let sorted: BTreeMap<_, _> = metadata.iter().collect();
    for (key, value) in sorted {
        push(params, format!("{}[{}]", prefix, key), value);
    }
}

impl StripeClient {
    pub fn new(settings: &StripeSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            secret_key: settings.secret_key.clone(),
            webhook_secret: settings.webhook_secret.clone(),
            webhook_tolerance_seconds: settings.webhook_tolerance_seconds,
        }
    }

    /// 计算回调签名（十六进制），签名内容为 `{timestamp}.{payload}`
    pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> DomainResult<String> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| DomainError::Internal(format!("Invalid webhook secret: {}", e)))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// 构造 `Stripe-Signature` 请求头
    pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> DomainResult<String> {
        Ok(format!(
            "t={},v1={}",
            timestamp,
            Self::sign_payload(secret, timestamp, payload)?
        ))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn execute(&self, request: RequestBuilder) -> DomainResult<(StatusCode, String)> {
        let response = request
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| DomainError::Payment(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Payment(e.to_string()))?;
        Ok((status, body))
    }

    fn parse<T: DeserializeOwned>(status: StatusCode, body: &str) -> DomainResult<T> {
        if !status.is_success() {
            let message = serde_json::from_str::<StripeErrorBody>(body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("status {}", status));
            warn!("Stripe request failed: {}", message);
            return Err(DomainError::Payment(message));
        }
        serde_json::from_str(body)
            .map_err(|e| DomainError::Payment(format!("Unexpected Stripe response: {}", e)))
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &FormParams,
    ) -> DomainResult<T> {
        let body = serde_urlencoded::to_string(params)
            .map_err(|e| DomainError::Internal(format!("Failed to encode form: {}", e)))?;
        debug!("POST {} ({} params)", path, params.len());

        let request = self
            .client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);
        let (status, body) = self.execute(request).await?;
        Self::parse(status, &body)
    }

    async fn create_price(
        &self,
        product_id: &str,
        amount: i64,
        currency: &str,
        interval: BillingInterval,
    ) -> DomainResult<StripePrice> {
        let mut params = FormParams::new();
        push(&mut params, "product", product_id);
        push(&mut params, "unit_amount", amount);
        push(&mut params, "currency", currency);
        push(&mut params, "recurring[interval]", interval);
        self.post_form("/v1/prices", &params).await
    }

    async fn set_active(&self, path: &str, active: bool) -> DomainResult<()> {
        let mut params = FormParams::new();
        push(&mut params, "active", active);
        let _: StripeObject = self.post_form(path, &params).await?;
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_plan(&self, plan: NewPlan) -> DomainResult<Plan> {
        let mut params = FormParams::new();
        push(&mut params, "name", &plan.name);
        if let Some(description) = plan.description.as_deref().filter(|d| !d.is_empty()) {
            push(&mut params, "description", description);
        }
        let product: StripeObject = self.post_form("/v1/products", &params).await?;

        let price = self
            .create_price(&product.id, plan.amount, &plan.currency, plan.interval)
            .await?;

        Ok(Plan {
            price_id: price.id,
            product_id: product.id,
            name: plan.name,
            description: plan.description,
            amount: plan.amount,
            currency: price.currency,
            interval: plan.interval,
            active: price.active,
        })
    }

    async fn list_plans(&self) -> DomainResult<Vec<Plan>> {
        let request = self.client.get(self.url("/v1/prices")).query(&[
            ("active", "true"),
            ("type", "recurring"),
            ("limit", "100"),
            ("expand[]", "data.product"),
        ]);
        let (status, body) = self.execute(request).await?;
        let prices: StripeList<StripePrice> = Self::parse(status, &body)?;

        Ok(prices
            .data
            .into_iter()
            .filter(StripePrice::product_active)
            .map(StripePrice::into_plan)
            .collect())
    }

    async fn retrieve_plan(&self, price_id: &str) -> DomainResult<Option<Plan>> {
        let request = self
            .client
            .get(self.url(&format!("/v1/prices/{}", price_id)))
            .query(&[("expand[]", "product")]);
        let (status, body) = self.execute(request).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let price: StripePrice = Self::parse(status, &body)?;
        Ok(Some(price.into_plan()))
    }

    async fn update_plan(&self, price_id: &str, changes: PlanChanges) -> DomainResult<Plan> {
        let current = self
            .retrieve_plan(price_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Plan not found".to_string()))?;

        if changes.name.is_some() || changes.description.is_some() {
            let mut params = FormParams::new();
            if let Some(name) = &changes.name {
                push(&mut params, "name", name);
            }
            if let Some(description) = &changes.description {
                push(&mut params, "description", description);
            }
            let _: StripeObject = self
                .post_form(&format!("/v1/products/{}", current.product_id), &params)
                .await?;
        }

        let price_id = if changes.requires_new_price(&current) {
            let price = self
                .create_price(
                    &current.product_id,
                    changes.amount.unwrap_or(current.amount),
                    &current.currency,
                    changes.interval.unwrap_or(current.interval),
                )
                .await?;
            self.set_active(&format!("/v1/prices/{}", current.price_id), false)
                .await?;
            price.id
        } else {
            current.price_id
        };

        self.retrieve_plan(&price_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Plan not found".to_string()))
    }

    async fn archive_plan(&self, price_id: &str) -> DomainResult<()> {
        let current = self
            .retrieve_plan(price_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Plan not found".to_string()))?;

        self.set_active(&format!("/v1/prices/{}", current.price_id), false)
            .await?;
        self.set_active(&format!("/v1/products/{}", current.product_id), false)
            .await
    }

    async fn create_discount(&self, percent_off: i32) -> DomainResult<String> {
        let mut params = FormParams::new();
        push(&mut params, "percent_off", percent_off);
        push(&mut params, "duration", "once");
        let coupon: StripeObject = self.post_form("/v1/coupons", &params).await?;
        Ok(coupon.id)
    }

    async fn create_subscription_checkout(
        &self,
        checkout: SubscriptionCheckout,
    ) -> DomainResult<CheckoutSession> {
        let mut params = FormParams::new();
        push(&mut params, "mode", "subscription");
        push(&mut params, "line_items[0][price]", &checkout.price_id);
        push(&mut params, "line_items[0][quantity]", 1);
        push(&mut params, "customer_email", &checkout.customer_email);
        push(&mut params, "success_url", &checkout.success_url);
        push(&mut params, "cancel_url", &checkout.cancel_url);
        if let Some(coupon) = &checkout.discount_coupon {
            push(&mut params, "discounts[0][coupon]", coupon);
        }
        push_metadata(&mut params, "metadata", &checkout.metadata);
        push_metadata(&mut params, "subscription_data[metadata]", &checkout.metadata);

        let session: StripeCheckoutSession =
            self.post_form("/v1/checkout/sessions", &params).await?;
        Ok(session.into())
    }

    async fn create_payment_checkout(
        &self,
        checkout: PaymentCheckout,
    ) -> DomainResult<CheckoutSession> {
        let mut params = FormParams::new();
        push(&mut params, "mode", "payment");
        push(&mut params, "line_items[0][price_data][currency]", &checkout.currency);
        push(
            &mut params,
            "line_items[0][price_data][product_data][name]",
            &checkout.product_name,
        );
        push(&mut params, "line_items[0][price_data][unit_amount]", checkout.amount);
        push(&mut params, "line_items[0][quantity]", 1);
        push(&mut params, "success_url", &checkout.success_url);
        push(&mut params, "cancel_url", &checkout.cancel_url);
        push_metadata(&mut params, "metadata", &checkout.metadata);

        let session: StripeCheckoutSession =
            self.post_form("/v1/checkout/sessions", &params).await?;
        Ok(session.into())
    }

    async fn cancel_subscription(&self, subscription_id: &str) -> DomainResult<()> {
        let request = self
            .client
            .delete(self.url(&format!("/v1/subscriptions/{}", subscription_id)));
        let (status, body) = self.execute(request).await?;
        let _: StripeObject = Self::parse(status, &body)?;
        Ok(())
    }

    fn verify_webhook(&self, payload: &[u8], signature: &str) -> DomainResult<PaymentEvent> {
        let invalid = || DomainError::Validation("Invalid webhook signature".to_string());

        let mut timestamp = None;
        let mut candidates = Vec::new();
        for part in signature.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
                Some(("v1", value)) => candidates.push(value),
                _ => {}
            }
        }
        let timestamp = timestamp.ok_or_else(invalid)?;

        let drift = Utc::now().timestamp().abs_diff(timestamp);
        if drift > self.webhook_tolerance_seconds.unsigned_abs() {
            return Err(DomainError::Validation(
                "Webhook timestamp outside the tolerance zone".to_string(),
            ));
        }

        let signed = candidates.iter().any(|candidate| {
            let Ok(expected) = hex::decode(candidate) else {
                return false;
            };
            let Ok(mut mac) = HmacSha256::new_from_slice(self.webhook_secret.as_bytes()) else {
                return false;
            };
            mac.update(timestamp.to_string().as_bytes());
            mac.update(b".");
            mac.update(payload);
            mac.verify_slice(&expected).is_ok()
        });
        if !signed {
            return Err(invalid());
        }

        serde_json::from_slice(payload)
            .map_err(|e| DomainError::Validation(format!("Malformed webhook payload: {}", e)))
    }
}

#[cfg(test)]
#[path = "stripe_client_test.rs"]
mod tests;
