// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::utils::errors::{DomainError, RepositoryError};

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 错误对应的状态码与返回给客户端的消息
    fn status_and_message(&self) -> (StatusCode, String) {
        if let Some(err) = self.0.downcast_ref::<DomainError>() {
            return match err {
                DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
                DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                DomainError::Payment(_) | DomainError::External(_) => {
                    (StatusCode::BAD_GATEWAY, err.to_string())
                }
                DomainError::Repository(repo) => repository_status(repo),
                DomainError::Internal(_) => internal(),
            };
        }

        if let Some(repo) = self.0.downcast_ref::<RepositoryError>() {
            return repository_status(repo);
        }

        internal()
    }
}

fn repository_status(err: &RepositoryError) -> (StatusCode, String) {
    match err {
        RepositoryError::NotFound => (StatusCode::NOT_FOUND, "Record not found".to_string()),
        _ => internal(),
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.0);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, message);
        }

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
