// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::coupon::Coupon;
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 优惠券仓库特质
///
/// 实现方在返回和保存之前刷新派生状态
#[async_trait]
pub trait CouponRepository: Send + Sync {
    async fn create(&self, coupon: &Coupon) -> Result<Coupon, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Coupon>, RepositoryError>;
    /// 券码需已规范化为大写
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, RepositoryError>;
    async fn list(&self, query: &PageQuery) -> Result<(Vec<Coupon>, u64), RepositoryError>;
    async fn update(&self, coupon: &Coupon) -> Result<Coupon, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 记录一次使用：使用次数加一并登记用户，同一用户重复登记不计数
    async fn record_usage(&self, coupon_id: Uuid, user_id: Uuid)
        -> Result<Coupon, RepositoryError>;
}
