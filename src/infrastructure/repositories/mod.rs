// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口基于 SeaORM 的具体实现
pub mod album_repo_impl;
pub mod banner_repo_impl;
pub mod coupon_repo_impl;
pub mod genre_repo_impl;
pub mod playlist_repo_impl;
pub mod track_repo_impl;
pub mod user_repo_impl;
pub mod verification_repo_impl;

use sea_orm::sea_query::LikeExpr;
use serde::de::DeserializeOwned;

use crate::utils::errors::RepositoryError;

/// 转义 LIKE 通配符
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// 小写模糊匹配模式
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{}%", escape_like(&term.to_lowercase()))
}

/// 转义字符为反斜杠的 LIKE 表达式
pub(crate) fn like_expr(pattern: String) -> LikeExpr {
    LikeExpr::new(pattern).escape('\\')
}

/// 解析 JSON 文本列，空串视为空列表
pub(crate) fn decode_json_list<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, RepositoryError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

pub(crate) fn encode_json_list<T: serde::Serialize>(items: &[T]) -> Result<String, RepositoryError> {
    Ok(serde_json::to_string(items)?)
}
