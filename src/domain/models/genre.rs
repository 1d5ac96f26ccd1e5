// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 音乐流派
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    /// 名称，大小写不敏感唯一
    pub name: String,
    /// 被屏蔽的流派不能用于新上传
    pub is_blocked: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Genre {
    pub fn new(name: &str) -> Self {
        let now = Utc::now().fixed_offset();
        Self {
            id: Uuid::new_v4(),
            name: normalize_genre_name(name),
            is_blocked: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 去除首尾空白并折叠内部连续空白，首字母大写
///
/// "  hip   hop " -> "Hip hop"
pub fn normalize_genre_name(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
