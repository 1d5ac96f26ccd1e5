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

use super::helpers::TestApp;
use axum::http::StatusCode;
use serde_json::Value;

/// 健康检查测试
///
/// 验证健康检查端点是否正常工作
#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn version_reports_package_version() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/version").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

/// 受保护端点在没有令牌时返回 401
#[tokio::test]
async fn protected_endpoints_return_401_without_auth() {
    let app = TestApp::spawn().await;

    for path in ["/user/profile", "/artist/tracks", "/admin/dashboard", "/provider/profile"] {
        let response = app.server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Access token missing");
    }
}

#[tokio::test]
async fn public_song_listing_needs_no_token() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/api/songs").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total"], 0);
}
