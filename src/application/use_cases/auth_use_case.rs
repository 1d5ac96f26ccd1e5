// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::auth_dto::{
    AuthSession, ChangePasswordRequest, EmailRequest, GoogleLoginRequest, LoginRequest,
    RegisterRequest, ResetPasswordRequest, VerifyOtpRequest,
};
use crate::application::dto::user_dto::{UpdateProfileRequest, UserDto};
use crate::domain::models::user::{normalize_email, User, UserRole};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::email_sender::{EmailMessage, EmailSender};
use crate::domain::services::google_identity::GoogleIdentity;
use crate::domain::services::otp_store::{OtpPayload, OtpPurpose, OtpStore, PendingRegistration};
use crate::domain::services::password_hasher::PasswordHasher;
use crate::domain::services::storage_service::{StorageService, UploadedFile};
use crate::domain::services::token_service::{TokenKind, TokenService};
use crate::infrastructure::metrics;
use crate::utils::errors::{DomainError, DomainResult};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const ACCOUNT_BLOCKED: &str = "Your account has been blocked";

/// 账号用例
///
/// 注册、验证码、登录、刷新令牌、密码与资料管理。
/// 各角色的用例持有同一个实例，并以自己的角色调用。
pub struct AuthUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    otp_store: Arc<dyn OtpStore>,
    email: Arc<dyn EmailSender>,
    google: Arc<dyn GoogleIdentity>,
    storage: Arc<dyn StorageService>,
    otp_ttl_seconds: u64,
}

impl AuthUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        otp_store: Arc<dyn OtpStore>,
        email: Arc<dyn EmailSender>,
        google: Arc<dyn GoogleIdentity>,
        storage: Arc<dyn StorageService>,
        otp_ttl_seconds: u64,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            otp_store,
            email,
            google,
            storage,
            otp_ttl_seconds,
        }
    }

    /// 暂存注册信息并发送验证码，账号在验证通过后才创建
    pub async fn register(&self, role: UserRole, dto: RegisterRequest) -> DomainResult<()> {
        dto.validate()?;
        let email = normalize_email(&dto.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("User already exists".to_string()));
        }

        let pending = PendingRegistration {
            name: dto.name.trim().to_string(),
            email: email.clone(),
            password_hash: self.hasher.hash(&dto.password)?,
            role,
        };
        let otp = self.otp_store.issue(&email, OtpPayload::Registration(pending));
        self.email
            .send(EmailMessage::otp(&email, &otp, self.otp_ttl_seconds))
            .await?;

        info!("Registration OTP sent to {} ({})", email, role);
        Ok(())
    }

    pub async fn verify_otp(&self, role: UserRole, dto: VerifyOtpRequest) -> DomainResult<UserDto> {
        dto.validate()?;
        let email = normalize_email(&dto.email);

        let payload = self
            .otp_store
            .verify(OtpPurpose::Registration, &email, dto.otp.trim())
            .map_err(|e| DomainError::Validation(e.to_string()))?;
        let OtpPayload::Registration(pending) = payload else {
            return Err(DomainError::Validation("Invalid OTP".to_string()));
        };

        if pending.role != role {
            return Err(DomainError::Forbidden(format!(
                "This registration belongs to a {} account",
                pending.role
            )));
        }
        // 同一邮箱可能在等待验证期间通过 Google 登录创建了账号
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("User already exists".to_string()));
        }

        let user = User::new(pending.name, pending.email, Some(pending.password_hash), pending.role);
        let user = self.users.create(&user).await?;
        info!("Created {} account {}", user.role, user.id);
        Ok(user.into())
    }

    /// 优先续发注册验证码，其次是重置密码验证码
    pub async fn resend_otp(&self, dto: EmailRequest) -> DomainResult<()> {
        dto.validate()?;
        let email = normalize_email(&dto.email);

        let otp = self
            .otp_store
            .reissue(OtpPurpose::Registration, &email)
            .or_else(|| self.otp_store.reissue(OtpPurpose::PasswordReset, &email))
            .ok_or_else(|| DomainError::Validation("OTP expired or not found".to_string()))?;

        self.email
            .send(EmailMessage::otp(&email, &otp, self.otp_ttl_seconds))
            .await
    }

    pub async fn login(&self, role: UserRole, dto: LoginRequest) -> DomainResult<AuthSession> {
        dto.validate()?;
        let email = normalize_email(&dto.email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .filter(|user| user.role == role)
            .ok_or_else(|| DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(DomainError::Unauthorized(
                "This account uses Google sign-in".to_string(),
            ));
        };
        if !self.hasher.verify(&dto.password, hash)? {
            warn!("Failed {} login for {}", role, email);
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        if !user.is_active {
            return Err(DomainError::Forbidden(ACCOUNT_BLOCKED.to_string()));
        }

        metrics::record_login(&role.to_string());
        self.session_for(user)
    }

    /// Google 登录只面向普通用户，首次登录时自动建号
    pub async fn google_login(&self, dto: GoogleLoginRequest) -> DomainResult<AuthSession> {
        dto.validate()?;
        let profile = self.google.verify(&dto.credential).await?;
        let email = normalize_email(&profile.email);

        let user = match self.users.find_by_email(&email).await? {
            Some(mut user) => {
                if user.role != UserRole::User {
                    return Err(DomainError::Forbidden(
                        "Google sign-in is only available for listeners".to_string(),
                    ));
                }
                if !user.is_active {
                    return Err(DomainError::Forbidden(ACCOUNT_BLOCKED.to_string()));
                }
                if user.google_id.is_none() {
                    user.google_id = Some(profile.subject);
                    if user.profile_image.is_none() {
                        user.profile_image = profile.picture;
                    }
                    user.updated_at = Utc::now().fixed_offset();
                    self.users.update(&user).await?
                } else {
                    user
                }
            }
            None => {
                let mut user = User::new(profile.name, email, None, UserRole::User);
                user.google_id = Some(profile.subject);
                user.profile_image = profile.picture;
                let user = self.users.create(&user).await?;
                info!("Created user {} from Google sign-in", user.id);
                user
            }
        };

        metrics::record_login("google");
        self.session_for(user)
    }

    /// 刷新令牌换取新的令牌对，角色必须与入口一致
    pub async fn refresh(&self, role: UserRole, refresh_token: Option<&str>) -> DomainResult<AuthSession> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::Unauthorized("Refresh token missing".to_string()))?;
        let claims = self.tokens.verify(token, TokenKind::Refresh)?;
        if claims.role != role {
            return Err(DomainError::Unauthorized("Invalid or expired token".to_string()));
        }

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("User not found".to_string()))?;
        if !user.is_active {
            return Err(DomainError::Forbidden(ACCOUNT_BLOCKED.to_string()));
        }

        debug!("Refreshed tokens for {}", user.id);
        self.session_for(user)
    }

    pub async fn forgot_password(&self, dto: EmailRequest) -> DomainResult<()> {
        dto.validate()?;
        let email = normalize_email(&dto.email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()))?;

        let otp = self
            .otp_store
            .issue(&email, OtpPayload::PasswordReset { user_id: user.id });
        self.email
            .send(EmailMessage::otp(&email, &otp, self.otp_ttl_seconds))
            .await
    }

    pub async fn reset_password(&self, dto: ResetPasswordRequest) -> DomainResult<()> {
        dto.validate()?;
        let email = normalize_email(&dto.email);

        let payload = self
            .otp_store
            .verify(OtpPurpose::PasswordReset, &email, dto.otp.trim())
            .map_err(|e| DomainError::Validation(e.to_string()))?;
        let OtpPayload::PasswordReset { user_id } = payload else {
            return Err(DomainError::Validation("Invalid OTP".to_string()));
        };

        let mut user = self.load(user_id).await?;
        user.password_hash = Some(self.hasher.hash(&dto.new_password)?);
        user.updated_at = Utc::now().fixed_offset();
        self.users.update(&user).await?;

        info!("Password reset for {}", user_id);
        Ok(())
    }

    pub async fn change_password(&self, user_id: Uuid, dto: ChangePasswordRequest) -> DomainResult<()> {
        dto.validate()?;
        let mut user = self.load(user_id).await?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(DomainError::Validation(
                "This account uses Google sign-in".to_string(),
            ));
        };
        if !self.hasher.verify(&dto.current_password, hash)? {
            return Err(DomainError::Validation("Current password is incorrect".to_string()));
        }

        user.password_hash = Some(self.hasher.hash(&dto.new_password)?);
        user.updated_at = Utc::now().fixed_offset();
        self.users.update(&user).await?;
        Ok(())
    }

    pub async fn profile(&self, user_id: Uuid) -> DomainResult<UserDto> {
        Ok(self.load(user_id).await?.into())
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        dto: UpdateProfileRequest,
        image: Option<UploadedFile>,
    ) -> DomainResult<UserDto> {
        dto.validate()?;
        let mut user = self.load(user_id).await?;

        if let Some(name) = dto.name {
            user.name = name.trim().to_string();
        }
        if let Some(bio) = dto.bio {
            user.bio = Some(bio.trim().to_string()).filter(|b| !b.is_empty());
        }
        if let Some(image) = image.filter(|f| !f.is_empty()) {
            user.profile_image = Some(self.storage.upload("profiles", image).await?);
        }
        user.updated_at = Utc::now().fixed_offset();

        Ok(self.users.update(&user).await?.into())
    }

    /// 按 ID 加载用户，不存在时返回 NotFound
    pub async fn load(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()))
    }

    fn session_for(&self, user: User) -> DomainResult<AuthSession> {
        let pair = self.tokens.issue_pair(user.id, user.role)?;
        Ok(AuthSession {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            user: user.into(),
        })
    }
}

#[cfg(test)]
#[path = "auth_use_case_test.rs"]
mod tests;
