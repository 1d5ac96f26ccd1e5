// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::services::deezer_client::DeezerTrack;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewQuery {
    pub limit: Option<u32>,
}

/// 访客试听歌曲
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTrackDto {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover: Option<String>,
    pub preview_url: String,
    /// 秒
    pub duration: i64,
}

impl From<DeezerTrack> for PreviewTrackDto {
    fn from(track: DeezerTrack) -> Self {
        Self {
            id: format!("deezer-{}", track.id),
            title: track.title,
            artist: track.artist.name,
            album: track.album.title,
            cover: track.album.cover_medium,
            preview_url: track.preview,
            duration: track.duration,
        }
    }
}
