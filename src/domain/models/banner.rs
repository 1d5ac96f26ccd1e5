// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 首页横幅
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    /// 点击跳转链接
    pub action: Option<String>,
    pub is_active: bool,
    /// 创建者（管理员）
    pub created_by: Uuid,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Banner {
    pub fn new(
        created_by: Uuid,
        title: String,
        description: Option<String>,
        image_url: String,
        action: Option<String>,
    ) -> Self {
        let now = Utc::now().fixed_offset();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            image_url,
            action,
            is_active: true,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}
