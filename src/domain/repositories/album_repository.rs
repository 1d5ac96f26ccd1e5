// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::album::Album;
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 专辑仓库特质
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn create(&self, album: &Album) -> Result<Album, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Album>, RepositoryError>;
    async fn find_by_artist(&self, artist_id: Uuid) -> Result<Vec<Album>, RepositoryError>;
    /// 分页查询，支持按名称搜索
    async fn list(&self, query: &PageQuery) -> Result<(Vec<Album>, u64), RepositoryError>;
    /// 整体覆盖保存（包括歌曲顺序）
    async fn update(&self, album: &Album) -> Result<Album, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
