// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::Rng;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::models::user::normalize_email;
use crate::domain::services::otp_store::{OtpError, OtpPayload, OtpPurpose, OtpStore};

#[derive(Debug, Clone)]
struct OtpEntry {
    otp: String,
    payload: OtpPayload,
    expires_at: Instant,
}

/// 进程内验证码缓存
///
/// 读取时检查过期，后台任务定期清理
pub struct OtpCache {
    entries: DashMap<(OtpPurpose, String), OtpEntry>,
    ttl: Duration,
    length: usize,
}

impl OtpCache {
    pub fn new(ttl: Duration, length: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            length: length.max(4),
        }
    }

    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }

    /// 启动定期清理任务
    pub fn spawn_sweeper(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let removed = self.sweep_expired();
                if removed > 0 {
                    debug!("Swept {} expired OTP entries", removed);
                }
            }
        })
    }
}

impl OtpStore for OtpCache {
    fn issue(&self, email: &str, payload: OtpPayload) -> String {
        let otp = self.generate();
        let key = (payload.purpose(), normalize_email(email));
        self.entries.insert(
            key,
            OtpEntry {
                otp: otp.clone(),
                payload,
                expires_at: Instant::now() + self.ttl,
            },
        );
        otp
    }

    fn verify(&self, purpose: OtpPurpose, email: &str, otp: &str) -> Result<OtpPayload, OtpError> {
        let key = (purpose, normalize_email(email));
        let now = Instant::now();

        // 读锁在语句结束时释放，之后才能移除
        let outcome = match self.entries.get(&key) {
            None => return Err(OtpError::ExpiredOrMissing),
            Some(entry) if entry.expires_at <= now => Err(OtpError::ExpiredOrMissing),
            Some(entry) if entry.otp != otp.trim() => return Err(OtpError::Invalid),
            Some(_) => Ok(()),
        };

        match outcome {
            Ok(()) => self
                .entries
                .remove(&key)
                .map(|(_, entry)| entry.payload)
                .ok_or(OtpError::ExpiredOrMissing),
            Err(e) => {
                self.entries.remove(&key);
                Err(e)
            }
        }
    }

    fn reissue(&self, purpose: OtpPurpose, email: &str) -> Option<String> {
        let key = (purpose, normalize_email(email));
        let now = Instant::now();

        let reissued = match self.entries.get_mut(&key) {
            None => return None,
            Some(entry) if entry.expires_at <= now => None,
            Some(mut entry) => {
                let otp = self.generate();
                entry.otp = otp.clone();
                entry.expires_at = now + self.ttl;
                Some(otp)
            }
        };

        if reissued.is_none() {
            self.entries.remove(&key);
        }
        reissued
    }

    fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.entries.len())
    }
}
