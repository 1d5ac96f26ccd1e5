// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::user_dto::ArtistDto;
use crate::domain::models::album::Album;
use crate::domain::models::track::{BillingPeriod, Track};
use crate::utils::pagination::PageQuery;

/// 歌曲列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub genre: Option<String>,
}

impl TrackQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
            search: self.search.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDto {
    pub id: Uuid,
    pub title: String,
    pub artist_id: Uuid,
    pub genres: Vec<String>,
    pub album_id: Option<Uuid>,
    pub file_url: String,
    pub image_url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub listeners: usize,
    pub total_plays: i64,
    pub monthly_plays: i64,
    pub created_at: DateTime<FixedOffset>,
}

impl From<Track> for TrackDto {
    fn from(track: Track) -> Self {
        let total_plays = track.total_plays();
        let monthly_plays = track.plays_in(BillingPeriod::current());
        Self {
            id: track.id,
            title: track.title,
            artist_id: track.artist_id,
            genres: track.genres,
            album_id: track.album_id,
            file_url: track.file_url,
            image_url: track.image_url,
            duration_seconds: track.duration_seconds,
            listeners: track.listeners.len(),
            total_plays,
            monthly_plays,
            created_at: track.created_at,
        }
    }
}

/// 播放计数结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayCountDto {
    pub track_id: Uuid,
    pub listeners: usize,
    pub total_plays: i64,
    pub monthly_plays: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeDto {
    pub track_id: Uuid,
    pub liked: bool,
}

/// 上传歌曲的文本字段
#[derive(Debug, Clone, Validate)]
pub struct UploadTrackRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "At least one genre is required"))]
    pub genres: Vec<String>,
    pub album_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateTrackRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "At least one genre is required"))]
    pub genres: Option<Vec<String>>,
    /// Some(None) 表示移出专辑
    pub album_id: Option<Option<Uuid>>,
}

/// 解析表单里的流派字段
///
/// 同时接受 JSON 数组（`["Rock","Pop"]`）和逗号分隔（`Rock, Pop`）两种写法
pub fn parse_genre_list(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    let items: Vec<String> = match serde_json::from_str::<Vec<String>>(raw) {
        Ok(list) => list,
        Err(_) => raw.split(',').map(str::to_string).collect(),
    };
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub artist_id: Uuid,
    pub cover_image: Option<String>,
    pub tracks: Vec<Uuid>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<Album> for AlbumDto {
    fn from(album: Album) -> Self {
        Self {
            id: album.id,
            name: album.name,
            description: album.description,
            artist_id: album.artist_id,
            cover_image: album.cover_image,
            tracks: album.tracks,
            created_at: album.created_at,
        }
    }
}

/// 专辑详情，歌曲按专辑内顺序排列
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDetailDto {
    #[serde(flatten)]
    pub album: AlbumDto,
    pub artist: Option<ArtistDto>,
    pub track_details: Vec<TrackDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDetailDto {
    #[serde(flatten)]
    pub artist: ArtistDto,
    pub tracks: Vec<TrackDto>,
    pub albums: Vec<AlbumDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResultDto {
    pub tracks: Vec<TrackDto>,
    pub albums: Vec<AlbumDto>,
    pub artists: Vec<ArtistDto>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAlbumRequest {
    #[validate(length(min = 1, max = 100, message = "Album name is required"))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAlbumRequest {
    #[validate(length(min = 1, max = 100, message = "Album name is required"))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}
