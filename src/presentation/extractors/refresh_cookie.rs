// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::utils::errors::{DomainError, DomainResult};

/// 刷新令牌所在的 Cookie 名称
pub const REFRESH_COOKIE: &str = "refreshToken";

/// 从 Cookie 中读取刷新令牌
pub fn refresh_token(jar: &CookieJar) -> Option<String> {
    jar.get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// 写入 HTTP-only 刷新令牌 Cookie，有效期与刷新令牌一致
pub fn set_refresh_cookie(
    jar: CookieJar,
    token: &str,
    secure: bool,
    ttl_days: i64,
) -> DomainResult<CookieJar> {
    let raw = format!("{}={}; Max-Age={}", REFRESH_COOKIE, token, ttl_days * 24 * 60 * 60);
    let mut cookie = Cookie::parse(raw)
        .map_err(|e| DomainError::Internal(format!("Failed to build cookie: {}", e)))?;
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(if secure { SameSite::None } else { SameSite::Lax });
    cookie.set_path("/");
    Ok(jar.add(cookie))
}

/// 总是下发一个已过期的空 Cookie，不依赖请求是否携带了旧值
pub fn clear_refresh_cookie(jar: CookieJar) -> CookieJar {
    let mut cookie = Cookie::build((REFRESH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .build();
    cookie.make_removal();
    jar.add(cookie)
}
