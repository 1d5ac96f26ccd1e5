// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use uuid::Uuid;

use super::auth_use_case::AuthUseCase;
use crate::application::dto::auth_dto::{AuthSession, LoginRequest};
use crate::application::dto::user_dto::UserDto;
use crate::domain::models::user::UserRole;
use crate::utils::errors::DomainResult;

/// 服务商账号只能登录和查看资料，账号由初始化数据创建
pub struct ProviderUseCase {
    auth: Arc<AuthUseCase>,
}

impl ProviderUseCase {
    pub fn new(auth: Arc<AuthUseCase>) -> Self {
        Self { auth }
    }

    pub async fn login(&self, dto: LoginRequest) -> DomainResult<AuthSession> {
        self.auth.login(UserRole::Provider, dto).await
    }

    pub async fn refresh(&self, refresh_token: Option<&str>) -> DomainResult<AuthSession> {
        self.auth.refresh(UserRole::Provider, refresh_token).await
    }

    pub async fn profile(&self, provider_id: Uuid) -> DomainResult<UserDto> {
        self.auth.profile(provider_id).await
    }
}
