// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::application::dto::catalog_dto::{PlayCountDto, TrackDto, TrackQuery};
use crate::domain::models::genre::normalize_genre_name;
use crate::domain::models::track::{BillingPeriod, TrackFilter};
use crate::domain::repositories::track_repository::TrackRepository;
use crate::infrastructure::metrics;
use crate::utils::errors::{DomainError, DomainResult, RepositoryError};
use crate::utils::pagination::Page;

/// 公共曲库与播放计数
pub struct TrackUseCase {
    tracks: Arc<dyn TrackRepository>,
}

impl TrackUseCase {
    pub fn new(tracks: Arc<dyn TrackRepository>) -> Self {
        Self { tracks }
    }

    pub async fn list(&self, query: &TrackQuery) -> DomainResult<Page<TrackDto>> {
        let filter = TrackFilter {
            search: query.search.clone(),
            genre: query
                .genre
                .as_deref()
                .map(normalize_genre_name)
                .filter(|g| !g.is_empty()),
            ..Default::default()
        };
        let page_query = query.page_query();
        let (items, total) = self.tracks.list(&filter, &page_query).await?;
        Ok(Page::new(items, total, &page_query).map(Into::into))
    }

    pub async fn get(&self, track_id: Uuid) -> DomainResult<TrackDto> {
        self.tracks
            .find_by_id(track_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| DomainError::NotFound("Track not found".to_string()))
    }

    /// 记录一次播放：听众集合去重，当月计数每次调用加一
    pub async fn increment_play(&self, track_id: Uuid, user_id: Uuid) -> DomainResult<PlayCountDto> {
        let period = BillingPeriod::current();
        self.tracks
            .record_play(track_id, user_id, period)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => DomainError::NotFound("Track not found".to_string()),
                other => other.into(),
            })?;
        metrics::record_play();
        debug!("Play recorded for track {} by {}", track_id, user_id);

        let track = self
            .tracks
            .find_by_id(track_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Track not found".to_string()))?;

        Ok(PlayCountDto {
            track_id: track.id,
            listeners: track.listeners.len(),
            total_plays: track.total_plays(),
            monthly_plays: track.plays_in(period),
        })
    }
}
