// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::utils::errors::DomainResult;

/// Google 账号信息
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleProfile {
    pub subject: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Google 身份校验特质
#[async_trait]
pub trait GoogleIdentity: Send + Sync {
    /// 校验 ID 令牌，令牌无效或受众不匹配时返回 Unauthorized
    async fn verify(&self, credential: &str) -> DomainResult<GoogleProfile>;
}
