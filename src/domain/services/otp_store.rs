// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use uuid::Uuid;

use crate::domain::models::user::UserRole;

/// 一次性验证码的用途
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpPurpose {
    Registration,
    PasswordReset,
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OtpPurpose::Registration => write!(f, "registration"),
            OtpPurpose::PasswordReset => write!(f, "password_reset"),
        }
    }
}

/// 验证通过前暂存的注册信息
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRegistration {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// 与验证码绑定的数据
#[derive(Debug, Clone, PartialEq)]
pub enum OtpPayload {
    Registration(PendingRegistration),
    PasswordReset { user_id: Uuid },
}

impl OtpPayload {
    pub fn purpose(&self) -> OtpPurpose {
        match self {
            OtpPayload::Registration(_) => OtpPurpose::Registration,
            OtpPayload::PasswordReset { .. } => OtpPurpose::PasswordReset,
        }
    }
}

/// 验证码校验失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpError {
    Invalid,
    ExpiredOrMissing,
}

impl fmt::Display for OtpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OtpError::Invalid => write!(f, "Invalid OTP"),
            OtpError::ExpiredOrMissing => write!(f, "OTP expired or not found"),
        }
    }
}

/// 验证码存储特质
///
/// 以 (用途, 邮箱) 为键，每个键最多保留一条记录
pub trait OtpStore: Send + Sync {
    /// 生成新验证码并覆盖旧记录，返回验证码
    fn issue(&self, email: &str, payload: OtpPayload) -> String;

    /// 校验成功后移除记录并返回绑定数据；验证码错误时记录保留
    fn verify(&self, purpose: OtpPurpose, email: &str, otp: &str) -> Result<OtpPayload, OtpError>;

    /// 为未过期的记录重新生成验证码
    fn reissue(&self, purpose: OtpPurpose, email: &str) -> Option<String>;

    /// 清理过期记录，返回清理数量
    fn sweep_expired(&self) -> usize;
}
