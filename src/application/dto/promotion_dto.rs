// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::banner::Banner;
use crate::domain::models::coupon::{Coupon, CouponStatus};

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    #[validate(length(min = 3, max = 20, message = "Coupon code must be between 3 and 20 characters"))]
    pub code: String,
    #[validate(range(min = 1, max = 100, message = "Discount must be between 1 and 100"))]
    pub discount: i32,
    pub expires: DateTime<Utc>,
    #[validate(range(min = 1, message = "Max uses must be at least 1"))]
    pub max_uses: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCouponRequest {
    #[validate(length(min = 3, max = 20, message = "Coupon code must be between 3 and 20 characters"))]
    pub code: Option<String>,
    #[validate(range(min = 1, max = 100, message = "Discount must be between 1 and 100"))]
    pub discount: Option<i32>,
    pub expires: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "Max uses must be at least 1"))]
    pub max_uses: Option<i32>,
    /// 只能手动设置 active / inactive，expired 由系统推导
    pub status: Option<CouponStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CouponCodeRequest {
    #[validate(length(min = 1, message = "Coupon code is required"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDto {
    pub id: Uuid,
    pub code: String,
    pub discount: i32,
    pub expires: DateTime<FixedOffset>,
    pub max_uses: i32,
    pub uses: i32,
    pub status: CouponStatus,
    pub created_at: DateTime<FixedOffset>,
}

impl From<Coupon> for CouponDto {
    fn from(coupon: Coupon) -> Self {
        Self {
            id: coupon.id,
            code: coupon.code,
            discount: coupon.discount,
            expires: coupon.expires,
            max_uses: coupon.max_uses,
            uses: coupon.uses,
            status: coupon.status,
            created_at: coupon.created_at,
        }
    }
}

/// 用户侧的优惠券校验结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponCheckDto {
    pub code: String,
    pub discount: i32,
    pub expires: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateBannerRequest {
    #[validate(length(min = 1, max = 100, message = "Banner title is required"))]
    pub title: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBannerRequest {
    #[validate(length(min = 1, max = 100, message = "Banner title is required"))]
    pub title: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub action: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub action: Option<String>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<FixedOffset>,
}

impl From<Banner> for BannerDto {
    fn from(banner: Banner) -> Self {
        Self {
            id: banner.id,
            title: banner.title,
            description: banner.description,
            image_url: banner.image_url,
            action: banner.action,
            is_active: banner.is_active,
            created_by: banner.created_by,
            created_at: banner.created_at,
        }
    }
}
