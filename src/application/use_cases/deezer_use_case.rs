// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use crate::application::dto::preview_dto::PreviewTrackDto;
use crate::domain::services::deezer_client::DeezerClient;
use crate::utils::errors::DomainResult;

const MAX_PREVIEW_LIMIT: u32 = 50;

/// 访客试听：Deezer 排行榜
pub struct DeezerUseCase {
    client: Arc<dyn DeezerClient>,
    default_limit: u32,
}

impl DeezerUseCase {
    pub fn new(client: Arc<dyn DeezerClient>, default_limit: u32) -> Self {
        Self {
            client,
            default_limit,
        }
    }

    pub async fn preview_tracks(&self, limit: Option<u32>) -> DomainResult<Vec<PreviewTrackDto>> {
        let limit = limit.unwrap_or(self.default_limit).clamp(1, MAX_PREVIEW_LIMIT);
        let tracks = self.client.chart_tracks(limit).await?;
        Ok(tracks
            .into_iter()
            .filter(|track| !track.preview.is_empty())
            .map(Into::into)
            .collect())
    }
}
