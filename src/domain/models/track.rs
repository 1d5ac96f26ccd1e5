// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 歌曲实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Uuid,
    pub title: String,
    /// 上传者（艺术家）ID
    pub artist_id: Uuid,
    pub genres: Vec<String>,
    pub album_id: Option<Uuid>,
    /// 音频文件地址
    pub file_url: String,
    /// 封面图地址
    pub image_url: Option<String>,
    pub duration_seconds: Option<i32>,
    /// 播放过这首歌的用户集合
    pub listeners: Vec<Uuid>,
    /// 按月统计的播放次数
    pub play_history: Vec<PlayHistoryEntry>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Track {
    /// 所有月份的播放次数之和
    pub fn total_plays(&self) -> i64 {
        self.play_history.iter().map(|entry| entry.plays).sum()
    }

    /// 指定月份的播放次数，没有记录时为 0
    pub fn plays_in(&self, period: BillingPeriod) -> i64 {
        self.play_history
            .iter()
            .find(|entry| entry.year == period.year && entry.month == period.month)
            .map(|entry| entry.plays)
            .unwrap_or(0)
    }
}

/// 单月播放计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayHistoryEntry {
    pub year: i32,
    /// 1..=12
    pub month: u32,
    pub plays: i64,
}

/// 计费月份
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub year: i32,
    pub month: u32,
}

impl BillingPeriod {
    pub fn current() -> Self {
        Self::of(Utc::now())
    }

    pub fn of(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    /// 例如 "2025-03"
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// 新歌曲数据
#[derive(Debug, Clone)]
pub struct NewTrack {
    pub title: String,
    pub artist_id: Uuid,
    pub genres: Vec<String>,
    pub album_id: Option<Uuid>,
    pub file_url: String,
    pub image_url: Option<String>,
    pub duration_seconds: Option<i32>,
}

/// 歌曲可修改字段，None 表示保持不变
#[derive(Debug, Clone, Default)]
pub struct TrackChanges {
    pub title: Option<String>,
    pub genres: Option<Vec<String>>,
    /// Some(None) 表示移出专辑
    pub album_id: Option<Option<Uuid>>,
    pub file_url: Option<String>,
    pub image_url: Option<String>,
}

/// 歌曲列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct TrackFilter {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub artist_id: Option<Uuid>,
    pub ids: Option<Vec<Uuid>>,
}
