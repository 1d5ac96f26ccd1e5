// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 优惠券实体
///
/// 状态在读取和保存前重新推导：过期或用尽即为 `Expired`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: Uuid,
    /// 券码，统一大写存储
    pub code: String,
    /// 折扣百分比 1..=100
    pub discount: i32,
    pub expires: DateTime<FixedOffset>,
    pub max_uses: i32,
    pub uses: i32,
    /// 使用过该券的用户
    pub users: Vec<Uuid>,
    pub status: CouponStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Coupon {
    pub fn new(code: &str, discount: i32, expires: DateTime<FixedOffset>, max_uses: i32) -> Self {
        let now = Utc::now().fixed_offset();
        let mut coupon = Self {
            id: Uuid::new_v4(),
            code: normalize_code(code),
            discount,
            expires,
            max_uses,
            uses: 0,
            users: Vec::new(),
            status: CouponStatus::Active,
            created_at: now,
            updated_at: now,
        };
        coupon.refresh_status(Utc::now());
        coupon
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.with_timezone(&Utc) < now
    }

    pub fn is_exhausted(&self) -> bool {
        self.uses >= self.max_uses
    }

    /// 根据到期时间和使用次数重新推导状态
    ///
    /// 未过期、未用尽的 `Expired` 券会恢复为 `Active`（例如管理员延长了有效期），
    /// 手动停用的 `Inactive` 保持不变
    pub fn refresh_status(&mut self, now: DateTime<Utc>) {
        if self.is_expired_at(now) || self.is_exhausted() {
            self.status = CouponStatus::Expired;
        } else if self.status == CouponStatus::Expired {
            self.status = CouponStatus::Active;
        }
    }

    /// 校验优惠券能否被指定用户使用
    ///
    /// 依次检查状态、使用次数、到期时间和重复使用
    pub fn check_redeemable(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<(), CouponRejection> {
        if self.status != CouponStatus::Active {
            return Err(CouponRejection::NotActive);
        }
        if self.is_exhausted() {
            return Err(CouponRejection::UsageLimitReached);
        }
        if self.is_expired_at(now) {
            return Err(CouponRejection::Expired);
        }
        if self.users.contains(&user_id) {
            return Err(CouponRejection::AlreadyUsed);
        }
        Ok(())
    }

    /// 计算折后金额（美分），向下取整
    pub fn apply_to(&self, amount_cents: i64) -> i64 {
        amount_cents - amount_cents * i64::from(self.discount) / 100
    }
}

/// 券码统一大写
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// 优惠券状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CouponStatus {
    #[default]
    Active,
    Inactive,
    Expired,
}

impl fmt::Display for CouponStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CouponStatus::Active => write!(f, "active"),
            CouponStatus::Inactive => write!(f, "inactive"),
            CouponStatus::Expired => write!(f, "expired"),
        }
    }
}

impl FromStr for CouponStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CouponStatus::Active),
            "inactive" => Ok(CouponStatus::Inactive),
            "expired" => Ok(CouponStatus::Expired),
            _ => Err(format!("Invalid coupon status: {}", s)),
        }
    }
}

/// 优惠券不可用的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponRejection {
    NotActive,
    UsageLimitReached,
    Expired,
    AlreadyUsed,
}

impl fmt::Display for CouponRejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CouponRejection::NotActive => write!(f, "Coupon is not active"),
            CouponRejection::UsageLimitReached => write!(f, "Coupon usage limit reached"),
            CouponRejection::Expired => write!(f, "Coupon has expired"),
            CouponRejection::AlreadyUsed => write!(f, "You have already used this coupon"),
        }
    }
}

#[cfg(test)]
#[path = "coupon_test.rs"]
mod tests;
