// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::DomainResult;

/// 密码哈希特质
pub trait PasswordHasher: Send + Sync {
    /// 计算密码哈希（PHC 字符串格式）
    fn hash(&self, password: &str) -> DomainResult<String>;

    /// 校验密码，哈希格式错误时返回错误而非 `false`
    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}
