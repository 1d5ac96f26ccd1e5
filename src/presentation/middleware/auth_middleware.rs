// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::models::user::UserRole;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::token_service::{TokenKind, TokenService};
use crate::presentation::errors::AppError;
use crate::utils::errors::DomainError;

/// 认证状态
///
/// `role` 为空时接受任意角色的访问令牌
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenService>,
    pub users: Arc<dyn UserRepository>,
    pub role: Option<UserRole>,
}

impl AuthState {
    pub fn for_role(&self, role: UserRole) -> Self {
        Self {
            role: Some(role),
            ..self.clone()
        }
    }

    pub fn any_role(&self) -> Self {
        Self {
            role: None,
            ..self.clone()
        }
    }
}

/// 通过认证的调用方，由中间件写入请求扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: UserRole,
}

/// 认证中间件
///
/// 校验 `Authorization: Bearer <access token>`，检查角色与封禁状态
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功后下游的响应
/// * `Err(AppError)` - 缺少令牌或令牌无效为 401，角色不符或账号封禁为 403
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    debug!("AuthMiddleware processing path: {}", req.uri().path());

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| DomainError::Unauthorized("Access token missing".to_string()))?;

    let claims = state.tokens.verify(token, TokenKind::Access)?;

    if let Some(role) = state.role {
        if claims.role != role {
            warn!("Role {} tried to access {} route", claims.role, role);
            return Err(DomainError::Forbidden("Access denied".to_string()).into());
        }
    }

    let user = state
        .users
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| DomainError::Unauthorized("User not found".to_string()))?;

    if !user.is_active {
        return Err(DomainError::Forbidden("Your account has been blocked".to_string()).into());
    }

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        role: user.role,
    });
    Ok(next.run(req).await)
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
