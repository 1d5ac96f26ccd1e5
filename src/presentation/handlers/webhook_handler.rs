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
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use crate::presentation::errors::AppError;
use crate::presentation::state::AppState;

pub const STRIPE_SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Stripe 回调
///
/// 请求体必须保持原样，签名是对原始字节计算的
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Err(e) = state.subscriptions.handle_webhook(&body, signature).await {
        warn!("Stripe webhook rejected: {}", e);
        return Err(e.into());
    }

    Ok(Json(json!({ "received": true })))
}
