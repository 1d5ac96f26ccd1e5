// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::playlist::Playlist;
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 播放列表仓库特质
#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    async fn create(&self, playlist: &Playlist) -> Result<Playlist, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>, RepositoryError>;
    /// 用户的播放列表，按更新时间倒序
    async fn list_by_user(
        &self,
        user_id: Uuid,
        query: &PageQuery,
    ) -> Result<(Vec<Playlist>, u64), RepositoryError>;
    async fn update(&self, playlist: &Playlist) -> Result<Playlist, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
