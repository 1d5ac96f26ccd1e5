// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::track::{BillingPeriod, NewTrack, Track, TrackChanges, TrackFilter};
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 歌曲仓库特质
///
/// 返回的 `Track` 总是带有完整的监听者集合和播放历史
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// 创建歌曲
    async fn create(&self, track: NewTrack) -> Result<Track, RepositoryError>;
    /// 根据ID查找歌曲
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Track>, RepositoryError>;
    /// 批量查找，结果顺序与输入一致，缺失的 ID 被跳过
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Track>, RepositoryError>;
    /// 条件分页查询，按创建时间倒序
    async fn list(
        &self,
        filter: &TrackFilter,
        query: &PageQuery,
    ) -> Result<(Vec<Track>, u64), RepositoryError>;
    /// 某位艺术家的全部歌曲
    async fn find_by_artist(&self, artist_id: Uuid) -> Result<Vec<Track>, RepositoryError>;
    /// 更新歌曲
    async fn update(&self, id: Uuid, changes: TrackChanges) -> Result<Track, RepositoryError>;
    /// 删除歌曲及其监听和播放记录
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 记录一次播放
    ///
    /// 在同一事务中把用户并入监听者集合，并把指定月份的计数加一
    async fn record_play(
        &self,
        track_id: Uuid,
        user_id: Uuid,
        period: BillingPeriod,
    ) -> Result<(), RepositoryError>;
    /// 清除指向某专辑的引用
    async fn clear_album(&self, album_id: Uuid) -> Result<u64, RepositoryError>;
    /// 歌曲总数
    async fn count(&self) -> Result<u64, RepositoryError>;
    /// 指定月份所有歌曲的播放总数
    async fn total_plays_in(&self, period: BillingPeriod) -> Result<i64, RepositoryError>;
}
