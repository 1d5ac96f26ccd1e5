// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::user::{User, UserRole};

/// 用户对外视图，不含密码与支付字段
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub premium: Option<String>,
    pub premium_expires_at: Option<DateTime<FixedOffset>>,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub liked_songs: Vec<Uuid>,
    pub has_subscription: bool,
    pub created_at: DateTime<FixedOffset>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            has_subscription: user.stripe_subscription_id.is_some(),
            premium: user.premium,
            premium_expires_at: user.premium_expires_at,
            profile_image: user.profile_image,
            bio: user.bio,
            liked_songs: user.liked_songs,
            created_at: user.created_at,
        }
    }
}

/// 公开的艺术家信息
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDto {
    pub id: Uuid,
    pub name: String,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
}

impl From<User> for ArtistDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            profile_image: user.profile_image,
            bio: user.bio,
        }
    }
}

/// 资料更新，来自 multipart 文本字段
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
}
