// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

/// 管理后台首页统计
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub total_users: u64,
    pub total_artists: u64,
    pub premium_users: u64,
    pub total_tracks: u64,
    pub monthly_plays: i64,
    pub period: String,
}
