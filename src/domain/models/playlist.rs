// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 播放列表实体
///
/// 由用户创建和拥有，歌曲按加入顺序排列且不重复
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// 所有者
    pub user_id: Uuid,
    /// 封面图
    pub image_url: Option<String>,
    pub tracks: Vec<Uuid>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Playlist {
    pub fn new(user_id: Uuid, name: String, description: Option<String>) -> Self {
        let now = Utc::now().fixed_offset();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            user_id,
            image_url: None,
            tracks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 追加歌曲，已存在时返回 false
    pub fn add_track(&mut self, track_id: Uuid) -> bool {
        if self.tracks.contains(&track_id) {
            return false;
        }
        self.tracks.push(track_id);
        true
    }

    /// 移除歌曲，不存在时返回 false
    pub fn remove_track(&mut self, track_id: Uuid) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|id| *id != track_id);
        before != self.tracks.len()
    }
}
