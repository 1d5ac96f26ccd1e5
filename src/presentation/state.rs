// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::application::use_cases::admin_use_case::AdminUseCase;
use crate::application::use_cases::artist_use_case::ArtistUseCase;
use crate::application::use_cases::auth_use_case::AuthUseCase;
use crate::application::use_cases::deezer_use_case::DeezerUseCase;
use crate::application::use_cases::genre_use_case::GenreUseCase;
use crate::application::use_cases::provider_use_case::ProviderUseCase;
use crate::application::use_cases::subscription_use_case::{BillingOptions, SubscriptionUseCase};
use crate::application::use_cases::track_use_case::TrackUseCase;
use crate::application::use_cases::user_use_case::UserUseCase;
use crate::config::settings::Settings;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::deezer_client::DeezerClient;
use crate::domain::services::email_sender::EmailSender;
use crate::domain::services::google_identity::GoogleIdentity;
use crate::domain::services::otp_store::OtpStore;
use crate::domain::services::password_hasher::PasswordHasher;
use crate::domain::services::payment_gateway::PaymentGateway;
use crate::domain::services::storage_service::StorageService;
use crate::domain::services::token_service::TokenService;
use crate::infrastructure::repositories::album_repo_impl::AlbumRepositoryImpl;
use crate::infrastructure::repositories::banner_repo_impl::BannerRepositoryImpl;
use crate::infrastructure::repositories::coupon_repo_impl::CouponRepositoryImpl;
use crate::infrastructure::repositories::genre_repo_impl::GenreRepositoryImpl;
use crate::infrastructure::repositories::playlist_repo_impl::PlaylistRepositoryImpl;
use crate::infrastructure::repositories::track_repo_impl::TrackRepositoryImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use crate::infrastructure::repositories::verification_repo_impl::VerificationRepositoryImpl;
use crate::presentation::middleware::auth_middleware::AuthState;

/// 外部服务集合
///
/// 生产环境由配置构造真实客户端，测试中可以替换为替身
#[derive(Clone)]
pub struct Services {
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub otp_store: Arc<dyn OtpStore>,
    pub email: Arc<dyn EmailSender>,
    pub google: Arc<dyn GoogleIdentity>,
    pub payments: Arc<dyn PaymentGateway>,
    pub storage: Arc<dyn StorageService>,
    pub deezer: Arc<dyn DeezerClient>,
}

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub auth: AuthState,
    pub users: Arc<UserUseCase>,
    pub artists: Arc<ArtistUseCase>,
    pub admin: Arc<AdminUseCase>,
    pub provider: Arc<ProviderUseCase>,
    pub genres: Arc<GenreUseCase>,
    pub tracks: Arc<TrackUseCase>,
    pub deezer: Arc<DeezerUseCase>,
    pub subscriptions: Arc<SubscriptionUseCase>,
}

impl AppState {
    /// 装配仓库与用例
    pub fn new(settings: Arc<Settings>, db: Arc<DatabaseConnection>, services: Services) -> Self {
        let user_repo: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(db.clone()));
        let track_repo = Arc::new(TrackRepositoryImpl::new(db.clone()));
        let album_repo = Arc::new(AlbumRepositoryImpl::new(db.clone()));
        let playlist_repo = Arc::new(PlaylistRepositoryImpl::new(db.clone()));
        let coupon_repo = Arc::new(CouponRepositoryImpl::new(db.clone()));
        let banner_repo = Arc::new(BannerRepositoryImpl::new(db.clone()));
        let genre_repo = Arc::new(GenreRepositoryImpl::new(db.clone()));
        let verification_repo = Arc::new(VerificationRepositoryImpl::new(db));

        let auth = Arc::new(AuthUseCase::new(
            user_repo.clone(),
            services.hasher.clone(),
            services.tokens.clone(),
            services.otp_store.clone(),
            services.email.clone(),
            services.google.clone(),
            services.storage.clone(),
            settings.otp.ttl_seconds,
        ));
        let subscriptions = Arc::new(SubscriptionUseCase::new(
            user_repo.clone(),
            coupon_repo.clone(),
            services.payments.clone(),
            BillingOptions::from_settings(&settings),
        ));

        let users = UserUseCase::new(
            auth.clone(),
            subscriptions.clone(),
            user_repo.clone(),
            track_repo.clone(),
            album_repo.clone(),
            playlist_repo,
            banner_repo.clone(),
            services.storage.clone(),
        );
        let artists = ArtistUseCase::new(
            auth.clone(),
            subscriptions.clone(),
            track_repo.clone(),
            album_repo,
            genre_repo.clone(),
            verification_repo.clone(),
            services.storage.clone(),
        );
        let admin = AdminUseCase::new(
            auth.clone(),
            subscriptions.clone(),
            user_repo.clone(),
            track_repo.clone(),
            coupon_repo,
            banner_repo,
            verification_repo,
            services.storage.clone(),
        );

        Self {
            auth: AuthState {
                tokens: services.tokens.clone(),
                users: user_repo,
                role: None,
            },
            users: Arc::new(users),
            artists: Arc::new(artists),
            admin: Arc::new(admin),
            provider: Arc::new(ProviderUseCase::new(auth)),
            genres: Arc::new(GenreUseCase::new(genre_repo)),
            tracks: Arc::new(TrackUseCase::new(track_repo)),
            deezer: Arc::new(DeezerUseCase::new(
                services.deezer.clone(),
                settings.deezer.default_limit,
            )),
            subscriptions,
            settings,
        }
    }
}
