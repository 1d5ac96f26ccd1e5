// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::user::UserRole;
use crate::utils::errors::DomainResult;

/// 令牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// 令牌声明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// 用户ID
    pub sub: Uuid,
    pub role: UserRole,
    /// 过期时间（Unix 秒）
    pub exp: i64,
    /// 签发时间（Unix 秒）
    pub iat: i64,
    pub typ: TokenKind,
}

/// 访问令牌与刷新令牌
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// 令牌服务特质
///
/// 访问令牌与刷新令牌使用不同的密钥签名
pub trait TokenService: Send + Sync {
    /// 签发指定类型的令牌
    fn issue(&self, user_id: Uuid, role: UserRole, kind: TokenKind) -> DomainResult<String>;

    /// 校验签名、类型和有效期
    fn verify(&self, token: &str, kind: TokenKind) -> DomainResult<Claims>;

    /// 同时签发两种令牌
    fn issue_pair(&self, user_id: Uuid, role: UserRole) -> DomainResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, role, TokenKind::Access)?,
            refresh_token: self.issue(user_id, role, TokenKind::Refresh)?,
        })
    }
}
