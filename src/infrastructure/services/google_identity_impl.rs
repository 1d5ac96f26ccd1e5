// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::config::settings::GoogleSettings;
use crate::domain::services::google_identity::{GoogleIdentity, GoogleProfile};
use crate::utils::errors::{DomainError, DomainResult};

/// 通过 Google tokeninfo 端点校验 ID 令牌
pub struct GoogleTokenInfoClient {
    client: reqwest::Client,
    tokeninfo_url: String,
    client_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: Option<String>,
    /// tokeninfo 以字符串返回布尔值
    email_verified: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl GoogleTokenInfoClient {
    pub fn new(settings: &GoogleSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            tokeninfo_url: settings.tokeninfo_url.clone(),
            client_id: settings.client_id.clone(),
        }
    }
}

fn rejected() -> DomainError {
    DomainError::Unauthorized("Invalid Google credential".to_string())
}

#[async_trait]
impl GoogleIdentity for GoogleTokenInfoClient {
    async fn verify(&self, credential: &str) -> DomainResult<GoogleProfile> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| DomainError::External(format!("Google verification failed: {}", e)))?;

        if !response.status().is_success() {
            warn!("Google tokeninfo rejected credential: {}", response.status());
            return Err(rejected());
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| DomainError::External(format!("Unexpected Google response: {}", e)))?;

        if !self.client_id.is_empty() && info.aud != self.client_id {
            warn!("Google credential issued for another audience: {}", info.aud);
            return Err(rejected());
        }
        if info.email_verified.as_deref() == Some("false") {
            return Err(rejected());
        }
        let email = info.email.ok_or_else(rejected)?;

        Ok(GoogleProfile {
            subject: info.sub,
            name: info
                .name
                .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string()),
            email,
            picture: info.picture,
        })
    }
}
