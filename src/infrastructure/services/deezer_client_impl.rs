// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::settings::DeezerSettings;
use crate::domain::services::deezer_client::{DeezerClient, DeezerTrack};
use crate::utils::errors::{DomainError, DomainResult};

/// Deezer 公开 API 客户端
pub struct DeezerHttpClient {
    client: reqwest::Client,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    #[serde(default)]
    data: Vec<DeezerTrack>,
}

impl DeezerHttpClient {
    pub fn new(settings: &DeezerSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DeezerClient for DeezerHttpClient {
    async fn chart_tracks(&self, limit: u32) -> DomainResult<Vec<DeezerTrack>> {
        let response = self
            .client
            .get(format!("{}/chart/0/tracks", self.api_base))
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| DomainError::External(format!("Deezer request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::External(format!(
                "Deezer responded with status {}",
                response.status()
            )));
        }

        let chart: ChartResponse = response
            .json()
            .await
            .map_err(|e| DomainError::External(format!("Unexpected Deezer response: {}", e)))?;
        Ok(chart.data)
    }
}
