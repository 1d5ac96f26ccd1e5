// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::genre::Genre;
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 流派仓库特质
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn create(&self, genre: &Genre) -> Result<Genre, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Genre>, RepositoryError>;
    /// 大小写不敏感的名称查找
    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, RepositoryError>;
    async fn list(&self, query: &PageQuery) -> Result<(Vec<Genre>, u64), RepositoryError>;
    /// 未屏蔽的流派，按名称排序
    async fn list_active(&self) -> Result<Vec<Genre>, RepositoryError>;
    async fn update(&self, genre: &Genre) -> Result<Genre, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
