// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::errors::DomainResult;

/// Deezer 榜单中的歌曲
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeezerTrack {
    pub id: i64,
    pub title: String,
    pub preview: String,
    pub duration: i64,
    pub artist: DeezerArtist,
    pub album: DeezerAlbum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeezerArtist {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeezerAlbum {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub cover_medium: Option<String>,
}

/// Deezer 公开接口客户端特质
#[async_trait]
pub trait DeezerClient: Send + Sync {
    /// 公开榜单中的前 limit 首歌曲
    async fn chart_tracks(&self, limit: u32) -> DomainResult<Vec<DeezerTrack>>;
}
