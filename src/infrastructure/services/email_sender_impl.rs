// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::config::settings::EmailSettings;
use crate::domain::services::email_sender::{EmailMessage, EmailSender};
use crate::utils::errors::{DomainError, DomainResult};

/// 只写日志的邮件发送实现，用于开发和测试环境
#[derive(Debug, Clone, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: EmailMessage) -> DomainResult<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Email delivery skipped (log provider): {}",
            message.body
        );
        Ok(())
    }
}

/// 通过 HTTP 邮件 API 发送
pub struct HttpEmailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

impl HttpEmailSender {
    pub fn new(api_url: String, api_key: Option<String>, from: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, message: EmailMessage) -> DomainResult<()> {
        let mut request = self.client.post(&self.api_url).json(&json!({
            "from": self.from,
            "to": [message.to],
            "subject": message.subject,
            "text": message.body,
        }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::External(format!("Email delivery failed: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(DomainError::External(format!(
                "Email delivery failed with status {}: {}",
                status, body
            )))
        }
    }
}

/// 根据配置选择邮件发送实现
pub fn build_email_sender(settings: &EmailSettings) -> Arc<dyn EmailSender> {
    match (settings.provider.as_str(), &settings.api_url) {
        ("http", Some(url)) => Arc::new(HttpEmailSender::new(
            url.clone(),
            settings.api_key.clone(),
            settings.from.clone(),
        )),
        ("http", None) => {
            tracing::warn!("Email provider 'http' configured without api_url, falling back to log");
            Arc::new(LogEmailSender)
        }
        _ => Arc::new(LogEmailSender),
    }
}
