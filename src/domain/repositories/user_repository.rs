// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::user::{User, UserRole};
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 用户仓库特质
///
/// 定义用户数据访问接口，喜欢的歌曲以集合方式维护
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 创建用户
    async fn create(&self, user: &User) -> Result<User, RepositoryError>;
    /// 根据ID查找用户（含喜欢的歌曲）
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    /// 根据邮箱查找用户，邮箱需已规范化
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    /// 根据 Stripe 订阅 ID 查找用户
    async fn find_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<User>, RepositoryError>;
    /// 更新用户资料字段（不含喜欢的歌曲）
    async fn update(&self, user: &User) -> Result<User, RepositoryError>;
    /// 按角色分页查询，支持按名称或邮箱模糊搜索
    async fn list_by_role(
        &self,
        role: UserRole,
        query: &PageQuery,
    ) -> Result<(Vec<User>, u64), RepositoryError>;
    /// 按角色计数
    async fn count_by_role(&self, role: UserRole) -> Result<u64, RepositoryError>;
    /// 订阅用户计数
    async fn count_premium(&self) -> Result<u64, RepositoryError>;
    /// 切换喜欢状态，返回切换后的状态
    async fn toggle_like(&self, user_id: Uuid, track_id: Uuid) -> Result<bool, RepositoryError>;
    /// 喜欢的歌曲 ID，按喜欢时间倒序
    async fn liked_track_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepositoryError>;
}
