// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 按调用方角色划分：普通用户、艺术家、管理员、服务商，
/// 另有公开的歌曲接口与 Stripe 回调
pub mod admin_handler;
pub mod artist_handler;
pub mod provider_handler;
pub mod song_handler;
pub mod user_handler;
pub mod webhook_handler;

use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::application::dto::auth_dto::{AuthResponse, AuthSession};
use crate::config::settings::Settings;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::refresh_cookie::{clear_refresh_cookie, set_refresh_cookie};

/// 统一的成功响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: None,
        data: Some(data),
    })
}

/// 只有提示信息的成功响应
pub fn done(message: impl Into<String>) -> Json<ApiResponse<()>> {
    Json(ApiResponse {
        success: true,
        message: Some(message.into()),
        data: None,
    })
}

/// 登录或刷新成功：访问令牌进响应体，刷新令牌写入 Cookie
pub(crate) fn session_response(
    settings: &Settings,
    jar: CookieJar,
    session: AuthSession,
) -> Result<(CookieJar, Json<ApiResponse<AuthResponse>>), AppError> {
    let jar = set_refresh_cookie(
        jar,
        &session.refresh_token,
        settings.auth.secure_cookies,
        settings.auth.refresh_ttl_days,
    )?;
    Ok((jar, ok(AuthResponse::from(session))))
}

pub(crate) fn logout_response(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    (clear_refresh_cookie(jar), done("Logged out successfully"))
}
