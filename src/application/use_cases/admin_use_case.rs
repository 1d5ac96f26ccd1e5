// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::auth_use_case::AuthUseCase;
use super::subscription_use_case::SubscriptionUseCase;
use crate::application::dto::admin_dto::DashboardDto;
use crate::application::dto::auth_dto::{AuthSession, LoginRequest};
use crate::application::dto::payment_dto::{CreatePlanRequest, UpdatePlanRequest};
use crate::application::dto::promotion_dto::{
    BannerDto, CouponDto, CreateBannerRequest, CreateCouponRequest, UpdateBannerRequest,
    UpdateCouponRequest,
};
use crate::application::dto::user_dto::UserDto;
use crate::application::dto::verification_dto::{
    ReviewVerificationRequest, VerificationDto, VerificationQuery,
};
use crate::domain::models::banner::Banner;
use crate::domain::models::coupon::{normalize_code, Coupon, CouponStatus};
use crate::domain::models::monetization::TrackMonetization;
use crate::domain::models::payment::Plan;
use crate::domain::models::track::{BillingPeriod, TrackFilter};
use crate::domain::models::user::UserRole;
use crate::domain::models::verification::VerificationStatus;
use crate::domain::repositories::banner_repository::BannerRepository;
use crate::domain::repositories::coupon_repository::CouponRepository;
use crate::domain::repositories::track_repository::TrackRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::verification_repository::VerificationRepository;
use crate::domain::services::storage_service::{StorageService, UploadedFile};
use crate::utils::errors::{DomainError, DomainResult};
use crate::utils::pagination::{Page, PageQuery};

/// 管理员用例：用户管理、优惠券、横幅、认证审核、套餐与统计
pub struct AdminUseCase {
    auth: Arc<AuthUseCase>,
    subscriptions: Arc<SubscriptionUseCase>,
    users: Arc<dyn UserRepository>,
    tracks: Arc<dyn TrackRepository>,
    coupons: Arc<dyn CouponRepository>,
    banners: Arc<dyn BannerRepository>,
    verifications: Arc<dyn VerificationRepository>,
    storage: Arc<dyn StorageService>,
}

impl AdminUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth: Arc<AuthUseCase>,
        subscriptions: Arc<SubscriptionUseCase>,
        users: Arc<dyn UserRepository>,
        tracks: Arc<dyn TrackRepository>,
        coupons: Arc<dyn CouponRepository>,
        banners: Arc<dyn BannerRepository>,
        verifications: Arc<dyn VerificationRepository>,
        storage: Arc<dyn StorageService>,
    ) -> Self {
        Self {
            auth,
            subscriptions,
            users,
            tracks,
            coupons,
            banners,
            verifications,
            storage,
        }
    }

    pub async fn login(&self, dto: LoginRequest) -> DomainResult<AuthSession> {
        self.auth.login(UserRole::Admin, dto).await
    }

    pub async fn refresh(&self, refresh_token: Option<&str>) -> DomainResult<AuthSession> {
        self.auth.refresh(UserRole::Admin, refresh_token).await
    }

    pub async fn users(&self, query: &PageQuery) -> DomainResult<Page<UserDto>> {
        let (items, total) = self.users.list_by_role(UserRole::User, query).await?;
        Ok(Page::new(items, total, query).map(Into::into))
    }

    pub async fn artists(&self, query: &PageQuery) -> DomainResult<Page<UserDto>> {
        let (items, total) = self.users.list_by_role(UserRole::Artist, query).await?;
        Ok(Page::new(items, total, query).map(Into::into))
    }

    /// 封禁或解封账号，管理员账号不可封禁
    pub async fn toggle_ban(&self, user_id: Uuid) -> DomainResult<UserDto> {
        let mut user = self.auth.load(user_id).await?;
        if user.role == UserRole::Admin {
            return Err(DomainError::Forbidden("Admins cannot be banned".to_string()));
        }
        user.is_active = !user.is_active;
        user.updated_at = Utc::now().fixed_offset();
        let user = self.users.update(&user).await?;
        info!(
            "{} {} ({})",
            if user.is_active { "Unbanned" } else { "Banned" },
            user.id,
            user.role
        );
        Ok(user.into())
    }

    pub async fn create_coupon(&self, dto: CreateCouponRequest) -> DomainResult<CouponDto> {
        dto.validate()?;
        let code = normalize_code(&dto.code);
        if self.coupons.find_by_code(&code).await?.is_some() {
            return Err(DomainError::Conflict("Coupon code already exists".to_string()));
        }
        if dto.expires <= Utc::now() {
            return Err(DomainError::Validation(
                "Expiry date must be in the future".to_string(),
            ));
        }

        let coupon = Coupon::new(&code, dto.discount, dto.expires.fixed_offset(), dto.max_uses);
        let coupon = self.coupons.create(&coupon).await?;
        info!("Created coupon {} ({}% off)", coupon.code, coupon.discount);
        Ok(coupon.into())
    }

    pub async fn coupons(&self, query: &PageQuery) -> DomainResult<Page<CouponDto>> {
        let (items, total) = self.coupons.list(query).await?;
        Ok(Page::new(items, total, query).map(Into::into))
    }

    pub async fn update_coupon(&self, coupon_id: Uuid, dto: UpdateCouponRequest) -> DomainResult<CouponDto> {
        dto.validate()?;
        let mut coupon = self.find_coupon(coupon_id).await?;

        if let Some(code) = dto.code {
            let code = normalize_code(&code);
            if code != coupon.code {
                if self.coupons.find_by_code(&code).await?.is_some() {
                    return Err(DomainError::Conflict("Coupon code already exists".to_string()));
                }
                coupon.code = code;
            }
        }
        if let Some(discount) = dto.discount {
            coupon.discount = discount;
        }
        if let Some(expires) = dto.expires {
            coupon.expires = expires.fixed_offset();
        }
        if let Some(max_uses) = dto.max_uses {
            coupon.max_uses = max_uses;
        }
        match dto.status {
            Some(CouponStatus::Expired) => {
                return Err(DomainError::Validation(
                    "Coupon status can only be set to active or inactive".to_string(),
                ));
            }
            Some(status) => coupon.status = status,
            None => {}
        }

        coupon.refresh_status(Utc::now());
        coupon.updated_at = Utc::now().fixed_offset();
        Ok(self.coupons.update(&coupon).await?.into())
    }

    pub async fn delete_coupon(&self, coupon_id: Uuid) -> DomainResult<()> {
        let coupon = self.find_coupon(coupon_id).await?;
        self.coupons.delete(coupon.id).await?;
        info!("Deleted coupon {}", coupon.code);
        Ok(())
    }

    pub async fn create_banner(
        &self,
        admin_id: Uuid,
        dto: CreateBannerRequest,
        image: Option<UploadedFile>,
    ) -> DomainResult<BannerDto> {
        dto.validate()?;
        let Some(image) = image.filter(|f| !f.is_empty()) else {
            return Err(DomainError::Validation("Banner image is required".to_string()));
        };
        let image_url = self.storage.upload("banners", image).await?;
        let banner = Banner::new(
            admin_id,
            dto.title.trim().to_string(),
            dto.description.filter(|d| !d.trim().is_empty()),
            image_url,
            dto.action.filter(|a| !a.trim().is_empty()),
        );
        Ok(self.banners.create(&banner).await?.into())
    }

    pub async fn banners(&self, query: &PageQuery) -> DomainResult<Page<BannerDto>> {
        let (items, total) = self.banners.list(query).await?;
        Ok(Page::new(items, total, query).map(Into::into))
    }

    pub async fn update_banner(
        &self,
        banner_id: Uuid,
        dto: UpdateBannerRequest,
        image: Option<UploadedFile>,
    ) -> DomainResult<BannerDto> {
        dto.validate()?;
        let mut banner = self.find_banner(banner_id).await?;
        if let Some(title) = dto.title {
            banner.title = title.trim().to_string();
        }
        if let Some(description) = dto.description {
            banner.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(action) = dto.action {
            banner.action = Some(action).filter(|a| !a.trim().is_empty());
        }
        if let Some(is_active) = dto.is_active {
            banner.is_active = is_active;
        }
        if let Some(image) = image.filter(|f| !f.is_empty()) {
            banner.image_url = self.storage.upload("banners", image).await?;
        }
        banner.updated_at = Utc::now().fixed_offset();
        Ok(self.banners.update(&banner).await?.into())
    }

    pub async fn delete_banner(&self, banner_id: Uuid) -> DomainResult<()> {
        let banner = self.find_banner(banner_id).await?;
        self.banners.delete(banner.id).await?;
        Ok(())
    }

    pub async fn verification_requests(&self, query: &VerificationQuery) -> DomainResult<Page<VerificationDto>> {
        let page_query = query.page_query();
        let (items, total) = self.verifications.list(query.status, &page_query).await?;

        let mut dtos = Vec::with_capacity(items.len());
        for request in items {
            let artist = self.users.find_by_id(request.artist_id).await?;
            dtos.push(VerificationDto::new(request, artist.as_ref()));
        }
        Ok(Page::new(dtos, total, &page_query))
    }

    /// 审核认证申请，只能审核待处理的申请
    pub async fn review_verification(
        &self,
        request_id: Uuid,
        dto: ReviewVerificationRequest,
    ) -> DomainResult<VerificationDto> {
        dto.validate()?;
        let mut request = self
            .verifications
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Verification request not found".to_string()))?;
        if request.status != VerificationStatus::Pending {
            return Err(DomainError::Conflict(format!(
                "Verification request is already {}",
                request.status
            )));
        }

        request.status = dto.decision.status();
        request.feedback = dto.feedback.filter(|f| !f.trim().is_empty());
        request.reviewed_at = Some(Utc::now().fixed_offset());
        let request = self.verifications.upsert(&request).await?;
        info!("Verification {} for artist {} {}", request.id, request.artist_id, request.status);

        let artist = self.users.find_by_id(request.artist_id).await?;
        Ok(VerificationDto::new(request, artist.as_ref()))
    }

    pub async fn create_plan(&self, dto: CreatePlanRequest) -> DomainResult<Plan> {
        self.subscriptions.create_plan(dto).await
    }

    pub async fn plans(&self) -> DomainResult<Vec<Plan>> {
        self.subscriptions.plans().await
    }

    pub async fn update_plan(&self, price_id: &str, dto: UpdatePlanRequest) -> DomainResult<Plan> {
        self.subscriptions.update_plan(price_id, dto).await
    }

    pub async fn archive_plan(&self, price_id: &str) -> DomainResult<()> {
        self.subscriptions.archive_plan(price_id).await
    }

    /// 所有歌曲的收益数据
    pub async fn music_monetization(&self, query: &PageQuery) -> DomainResult<Page<TrackMonetization>> {
        let period = BillingPeriod::current();
        let per_play_cents = self.subscriptions.options().per_play_cents;
        let (tracks, total) = self.tracks.list(&TrackFilter::default(), query).await?;
        let items = tracks
            .iter()
            .map(|track| TrackMonetization::compute(track, period, per_play_cents))
            .collect();
        Ok(Page::new(items, total, query))
    }

    pub async fn dashboard(&self) -> DomainResult<DashboardDto> {
        let period = BillingPeriod::current();
        Ok(DashboardDto {
            total_users: self.users.count_by_role(UserRole::User).await?,
            total_artists: self.users.count_by_role(UserRole::Artist).await?,
            premium_users: self.users.count_premium().await?,
            total_tracks: self.tracks.count().await?,
            monthly_plays: self.tracks.total_plays_in(period).await?,
            period: period.label(),
        })
    }

    async fn find_coupon(&self, coupon_id: Uuid) -> DomainResult<Coupon> {
        self.coupons
            .find_by_id(coupon_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Coupon not found".to_string()))
    }

    async fn find_banner(&self, banner_id: Uuid) -> DomainResult<Banner> {
        self.banners
            .find_by_id(banner_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Banner not found".to_string()))
    }
}

#[cfg(test)]
#[path = "admin_use_case_test.rs"]
mod tests;
