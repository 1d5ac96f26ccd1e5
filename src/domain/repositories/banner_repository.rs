// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::banner::Banner;
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 横幅仓库特质
#[async_trait]
pub trait BannerRepository: Send + Sync {
    async fn create(&self, banner: &Banner) -> Result<Banner, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Banner>, RepositoryError>;
    async fn list(&self, query: &PageQuery) -> Result<(Vec<Banner>, u64), RepositoryError>;
    /// 所有启用中的横幅，最新的在前
    async fn list_active(&self) -> Result<Vec<Banner>, RepositoryError>;
    async fn update(&self, banner: &Banner) -> Result<Banner, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
