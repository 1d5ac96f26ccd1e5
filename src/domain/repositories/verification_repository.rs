// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::verification::{VerificationRequest, VerificationStatus};
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 认证申请仓库特质
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// 以艺术家 ID 为键插入或覆盖
    async fn upsert(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationRequest, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRequest>, RepositoryError>;
    async fn find_by_artist(
        &self,
        artist_id: Uuid,
    ) -> Result<Option<VerificationRequest>, RepositoryError>;
    /// 分页查询，按提交时间倒序
    async fn list(
        &self,
        status: Option<VerificationStatus>,
        query: &PageQuery,
    ) -> Result<(Vec<VerificationRequest>, u64), RepositoryError>;
}
