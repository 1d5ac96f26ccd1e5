// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 专辑实体，`tracks` 保持加入顺序
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub artist_id: Uuid,
    pub cover_image: Option<String>,
    pub tracks: Vec<Uuid>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Album {
    pub fn new(
        artist_id: Uuid,
        name: String,
        description: Option<String>,
        cover_image: Option<String>,
    ) -> Self {
        let now = Utc::now().fixed_offset();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            artist_id,
            cover_image,
            tracks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
