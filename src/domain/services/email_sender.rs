// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::utils::errors::DomainResult;

/// 待发送的邮件
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    /// 验证码邮件
    pub fn otp(to: &str, otp: &str, ttl_seconds: u64) -> Self {
        Self {
            to: to.to_string(),
            subject: "Your Xtaze verification code".to_string(),
            body: format!(
                "Your verification code is {}. It expires in {} minutes.",
                otp,
                ttl_seconds.div_ceil(60)
            ),
        }
    }
}

/// 邮件发送特质
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> DomainResult<()>;
}
