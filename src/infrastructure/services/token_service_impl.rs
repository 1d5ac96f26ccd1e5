// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::config::settings::AuthSettings;
use crate::domain::models::user::UserRole;
use crate::domain::services::token_service::{Claims, TokenKind, TokenService};
use crate::utils::errors::{DomainError, DomainResult};

type HmacSha256 = Hmac<Sha256>;

/// HS256 头部，固定不变
const JWT_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// HMAC-SHA256 签名的 JWT 令牌服务
pub struct JwtTokenService {
    access_secret: String,
    refresh_secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtTokenService {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            access_secret: settings.access_secret.clone(),
            refresh_secret: settings.refresh_secret.clone(),
            access_ttl: Duration::minutes(settings.access_ttl_minutes),
            refresh_ttl: Duration::days(settings.refresh_ttl_days),
        }
    }

    fn secret_for(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.access_secret.as_bytes(),
            TokenKind::Refresh => self.refresh_secret.as_bytes(),
        }
    }

    fn mac_for(&self, kind: TokenKind, signing_input: &str) -> DomainResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.secret_for(kind))
            .map_err(|e| DomainError::Internal(format!("Invalid signing key: {}", e)))?;
        mac.update(signing_input.as_bytes());
        Ok(mac)
    }
}

fn invalid_token() -> DomainError {
    DomainError::Unauthorized("Invalid or expired token".to_string())
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: Uuid, role: UserRole, kind: TokenKind) -> DomainResult<String> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: user_id,
            role,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            typ: kind,
        };
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| DomainError::Internal(format!("Failed to encode claims: {}", e)))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(JWT_HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = self.mac_for(kind, &signing_input)?.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    fn verify(&self, token: &str, kind: TokenKind) -> DomainResult<Claims> {
        let mut parts = token.split('.');
        let (header, payload, signature) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(p), Some(s), None) => (h, p, s),
                _ => return Err(invalid_token()),
            };

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| invalid_token())?;
        self.mac_for(kind, &format!("{}.{}", header, payload))?
            .verify_slice(&signature)
            .map_err(|_| invalid_token())?;

        let payload = URL_SAFE_NO_PAD.decode(payload).map_err(|_| invalid_token())?;
        let claims: Claims = serde_json::from_slice(&payload).map_err(|_| invalid_token())?;

        if claims.typ != kind || claims.exp <= Utc::now().timestamp() {
            return Err(invalid_token());
        }

        Ok(claims)
    }
}
