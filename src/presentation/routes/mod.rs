// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod admin;
pub mod artist;
pub mod catalog;
pub mod user;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::settings::Settings;
use crate::presentation::handlers::webhook_handler;
use crate::presentation::state::AppState;

/// 上传音频允许的最大请求体
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/webhook", post(webhook_handler::stripe_webhook));

    let mut app = Router::new()
        .merge(public_routes)
        .nest("/user", user::user_routes(&state))
        .nest("/artist", artist::artist_routes(&state))
        .nest("/admin", admin::admin_routes(&state))
        .nest("/provider", catalog::provider_routes(&state))
        .nest("/api/songs", catalog::song_routes(&state));

    if state.settings.storage.storage_type == "local" {
        let dir = state
            .settings
            .storage
            .local_path
            .clone()
            .unwrap_or_else(|| "./storage".to_string());
        app = app.nest_service("/uploads", ServeDir::new(dir));
    }

    let cors = cors_layer(&state.settings);
    app.layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 只允许前端地址跨域，并允许携带 Cookie
fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .server
        .client_url
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
