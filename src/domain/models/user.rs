// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 用户实体
///
/// 普通用户、艺术家、管理员与服务商共用同一张表，通过角色区分。
/// 账号从不物理删除，封禁通过 `is_active = false` 表示。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 用户唯一标识符
    pub id: Uuid,
    /// 显示名称
    pub name: String,
    /// 登录邮箱，全局唯一
    pub email: String,
    /// 密码哈希，Google 登录的账号没有密码
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// 账号角色
    pub role: UserRole,
    /// 是否可用，false 表示已被封禁
    pub is_active: bool,
    /// 当前订阅的套餐名称
    pub premium: Option<String>,
    /// 订阅到期时间
    pub premium_expires_at: Option<DateTime<FixedOffset>>,
    /// 喜欢的歌曲
    pub liked_songs: Vec<Uuid>,
    pub stripe_customer_id: Option<String>,
    pub stripe_payment_method_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub google_id: Option<String>,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl User {
    /// 创建一个新的用户
    pub fn new(name: String, email: String, password_hash: Option<String>, role: UserRole) -> Self {
        let now = Utc::now().fixed_offset();
        Self {
            id: Uuid::new_v4(),
            name,
            email: normalize_email(&email),
            password_hash,
            role,
            is_active: true,
            premium: None,
            premium_expires_at: None,
            liked_songs: Vec::new(),
            stripe_customer_id: None,
            stripe_payment_method_id: None,
            stripe_subscription_id: None,
            google_id: None,
            profile_image: None,
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.premium.is_some()
    }
}

/// 邮箱统一转小写并去除空白
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Artist,
    Admin,
    Provider,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Artist => write!(f, "artist"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Provider => write!(f, "provider"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "artist" => Ok(UserRole::Artist),
            "admin" => Ok(UserRole::Admin),
            "provider" => Ok(UserRole::Provider),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}
