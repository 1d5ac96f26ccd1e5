// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use uuid::Uuid;

use super::track::{BillingPeriod, Track};

/// 单曲收益
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackMonetization {
    pub track_id: Uuid,
    pub title: String,
    pub artist_id: Uuid,
    pub total_plays: i64,
    pub monthly_plays: i64,
    /// 美元
    pub total_revenue: f64,
    /// 美元
    pub monthly_revenue: f64,
}

impl TrackMonetization {
    /// 收益 = 播放次数 * 单次播放单价
    pub fn compute(track: &Track, period: BillingPeriod, per_play_cents: i64) -> Self {
        let total_plays = track.total_plays();
        let monthly_plays = track.plays_in(period);
        Self {
            track_id: track.id,
            title: track.title.clone(),
            artist_id: track.artist_id,
            total_plays,
            monthly_plays,
            total_revenue: cents_to_dollars(total_plays * per_play_cents),
            monthly_revenue: cents_to_dollars(monthly_plays * per_play_cents),
        }
    }
}

pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}
