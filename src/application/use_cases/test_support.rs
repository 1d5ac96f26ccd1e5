// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 用例测试的公共装配：内存 SQLite + 真实仓库 + 外部服务替身

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::admin_use_case::AdminUseCase;
use super::artist_use_case::ArtistUseCase;
use super::auth_use_case::AuthUseCase;
use super::genre_use_case::GenreUseCase;
use super::provider_use_case::ProviderUseCase;
use super::subscription_use_case::{BillingOptions, SubscriptionUseCase};
use super::track_use_case::TrackUseCase;
use super::user_use_case::UserUseCase;
use crate::config::settings::{AuthSettings, DatabaseSettings};
use crate::domain::models::genre::Genre;
use crate::domain::models::payment::{
    BillingInterval, CheckoutSession, PaymentCheckout, PaymentEvent, Plan, SubscriptionCheckout,
};
use crate::domain::models::track::{NewTrack, Track};
use crate::domain::models::user::{User, UserRole};
use crate::domain::repositories::genre_repository::GenreRepository;
use crate::domain::repositories::track_repository::TrackRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::deezer_client::{DeezerAlbum, DeezerArtist, DeezerClient, DeezerTrack};
use crate::domain::services::email_sender::{EmailMessage, EmailSender};
use crate::domain::services::google_identity::{GoogleIdentity, GoogleProfile};
use crate::domain::services::password_hasher::PasswordHasher;
use crate::domain::services::payment_gateway::{NewPlan, PaymentGateway, PlanChanges};
use crate::domain::services::storage_service::UploadedFile;
use crate::infrastructure::database::connection::create_pool;
use crate::infrastructure::repositories::album_repo_impl::AlbumRepositoryImpl;
use crate::infrastructure::repositories::banner_repo_impl::BannerRepositoryImpl;
use crate::infrastructure::repositories::coupon_repo_impl::CouponRepositoryImpl;
use crate::infrastructure::repositories::genre_repo_impl::GenreRepositoryImpl;
use crate::infrastructure::repositories::playlist_repo_impl::PlaylistRepositoryImpl;
use crate::infrastructure::repositories::track_repo_impl::TrackRepositoryImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use crate::infrastructure::repositories::verification_repo_impl::VerificationRepositoryImpl;
use crate::infrastructure::services::otp_cache::OtpCache;
use crate::infrastructure::services::password_hasher_impl::Argon2PasswordHasher;
use crate::infrastructure::services::token_service_impl::JwtTokenService;
use crate::infrastructure::storage::InMemoryStorage;
use crate::utils::errors::{DomainError, DomainResult};

pub const TEST_PASSWORD: &str = "password1";
pub const VALID_SIGNATURE: &str = "t=1,v1=valid";
pub const PER_PLAY_CENTS: i64 = 50;

pub async fn memory_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: None,
        min_connections: None,
        connect_timeout: None,
        idle_timeout: None,
    };
    let db = create_pool(&settings).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

pub fn auth_settings() -> AuthSettings {
    AuthSettings {
        access_secret: "test-access".to_string(),
        refresh_secret: "test-refresh".to_string(),
        access_ttl_minutes: 15,
        refresh_ttl_days: 7,
        secure_cookies: false,
    }
}

pub fn upload(name: &str) -> UploadedFile {
    UploadedFile {
        field_name: "file".to_string(),
        filename: name.to_string(),
        content_type: None,
        bytes: b"bytes".to_vec(),
    }
}

/// 记录发出的邮件
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingEmailSender {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// 从最近一封发给该邮箱的邮件中取出验证码
    pub fn last_otp_for(&self, email: &str) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        sent.iter().rev().find(|m| m.to == email).and_then(|m| {
            m.body
                .split_whitespace()
                .map(|word| word.trim_end_matches('.'))
                .find(|word| word.len() >= 4 && word.chars().all(|c| c.is_ascii_digit()))
                .map(str::to_string)
        })
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: EmailMessage) -> DomainResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// `valid:<email>` 形式的凭证视为有效
pub struct FakeGoogle;

#[async_trait]
impl GoogleIdentity for FakeGoogle {
    async fn verify(&self, credential: &str) -> DomainResult<GoogleProfile> {
        let email = credential
            .strip_prefix("valid:")
            .ok_or_else(|| DomainError::Unauthorized("Invalid Google credential".to_string()))?;
        Ok(GoogleProfile {
            subject: format!("google-{}", email),
            email: email.to_string(),
            name: "Google User".to_string(),
            picture: Some("https://example.com/avatar.png".to_string()),
        })
    }
}

#[derive(Default)]
pub struct FakeDeezer {
    tracks: Vec<DeezerTrack>,
    last_limit: Mutex<Option<u32>>,
}

impl FakeDeezer {
    /// 第三首歌没有试听地址
    pub fn with_tracks(count: i64) -> Self {
        let tracks = (1..=count)
            .map(|id| DeezerTrack {
                id,
                title: format!("Track {}", id),
                preview: if id == 3 {
                    String::new()
                } else {
                    format!("https://cdn.deezer.test/{}.mp3", id)
                },
                duration: 30,
                artist: DeezerArtist {
                    id,
                    name: format!("Artist {}", id),
                },
                album: DeezerAlbum {
                    id,
                    title: format!("Album {}", id),
                    cover_medium: None,
                },
            })
            .collect();
        Self {
            tracks,
            last_limit: Mutex::new(None),
        }
    }

    pub fn last_limit(&self) -> Option<u32> {
        *self.last_limit.lock().unwrap()
    }
}

#[async_trait]
impl DeezerClient for FakeDeezer {
    async fn chart_tracks(&self, limit: u32) -> DomainResult<Vec<DeezerTrack>> {
        *self.last_limit.lock().unwrap() = Some(limit);
        Ok(self.tracks.iter().take(limit as usize).cloned().collect())
    }
}

/// 内存支付网关，只接受 [`VALID_SIGNATURE`] 签名
#[derive(Default)]
pub struct FakePaymentGateway {
    pub plans: Mutex<Vec<Plan>>,
    pub discounts: Mutex<Vec<i32>>,
    pub subscription_checkouts: Mutex<Vec<SubscriptionCheckout>>,
    pub payment_checkouts: Mutex<Vec<PaymentCheckout>>,
    pub cancelled: Mutex<Vec<String>>,
}

impl FakePaymentGateway {
    fn session(&self, amount_total: Option<i64>) -> CheckoutSession {
        let n = self.subscription_checkouts.lock().unwrap().len()
            + self.payment_checkouts.lock().unwrap().len();
        CheckoutSession {
            id: format!("cs_test_{}", n),
            url: Some(format!("https://checkout.stripe.test/cs_test_{}", n)),
            amount_total,
        }
    }
}

#[async_trait]
impl PaymentGateway for FakePaymentGateway {
    async fn create_plan(&self, plan: NewPlan) -> DomainResult<Plan> {
        let mut plans = self.plans.lock().unwrap();
        let n = plans.len() + 1;
        let created = Plan {
            price_id: format!("price_{}", n),
            product_id: format!("prod_{}", n),
            name: plan.name,
            description: plan.description,
            amount: plan.amount,
            currency: plan.currency,
            interval: plan.interval,
            active: true,
        };
        plans.push(created.clone());
        Ok(created)
    }

    async fn list_plans(&self) -> DomainResult<Vec<Plan>> {
        Ok(self.plans.lock().unwrap().clone())
    }

    async fn retrieve_plan(&self, price_id: &str) -> DomainResult<Option<Plan>> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.price_id == price_id)
            .cloned())
    }

    async fn update_plan(&self, price_id: &str, changes: PlanChanges) -> DomainResult<Plan> {
        let mut plans = self.plans.lock().unwrap();
        let plan = plans
            .iter_mut()
            .find(|p| p.price_id == price_id)
            .ok_or_else(|| DomainError::NotFound("Plan not found".to_string()))?;
        if let Some(name) = changes.name {
            plan.name = name;
        }
        if let Some(description) = changes.description {
            plan.description = Some(description);
        }
        if let Some(amount) = changes.amount {
            plan.amount = amount;
        }
        if let Some(interval) = changes.interval {
            plan.interval = interval;
        }
        Ok(plan.clone())
    }

    async fn archive_plan(&self, price_id: &str) -> DomainResult<()> {
        for plan in self.plans.lock().unwrap().iter_mut() {
            if plan.price_id == price_id {
                plan.active = false;
            }
        }
        Ok(())
    }

    async fn create_discount(&self, percent_off: i32) -> DomainResult<String> {
        let mut discounts = self.discounts.lock().unwrap();
        discounts.push(percent_off);
        Ok(format!("coupon_{}", discounts.len()))
    }

    async fn create_subscription_checkout(
        &self,
        checkout: SubscriptionCheckout,
    ) -> DomainResult<CheckoutSession> {
        let session = self.session(None);
        self.subscription_checkouts.lock().unwrap().push(checkout);
        Ok(session)
    }

    async fn create_payment_checkout(&self, checkout: PaymentCheckout) -> DomainResult<CheckoutSession> {
        let session = self.session(Some(checkout.amount));
        self.payment_checkouts.lock().unwrap().push(checkout);
        Ok(session)
    }

    async fn cancel_subscription(&self, subscription_id: &str) -> DomainResult<()> {
        self.cancelled.lock().unwrap().push(subscription_id.to_string());
        Ok(())
    }

    fn verify_webhook(&self, payload: &[u8], signature: &str) -> DomainResult<PaymentEvent> {
        if signature != VALID_SIGNATURE {
            return Err(DomainError::Validation("Invalid webhook signature".to_string()));
        }
        serde_json::from_slice(payload).map_err(|e| DomainError::Validation(e.to_string()))
    }
}

/// 装配好的全部用例
pub struct TestContext {
    pub user_repo: Arc<UserRepositoryImpl>,
    pub track_repo: Arc<TrackRepositoryImpl>,
    pub genre_repo: Arc<GenreRepositoryImpl>,
    pub coupon_repo: Arc<CouponRepositoryImpl>,
    pub album_repo: Arc<AlbumRepositoryImpl>,
    pub banner_repo: Arc<BannerRepositoryImpl>,
    pub verification_repo: Arc<VerificationRepositoryImpl>,
    pub email: Arc<RecordingEmailSender>,
    pub payments: Arc<FakePaymentGateway>,
    pub storage: Arc<InMemoryStorage>,
    pub auth: Arc<AuthUseCase>,
    pub subscriptions: Arc<SubscriptionUseCase>,
    pub users: UserUseCase,
    pub artists: ArtistUseCase,
    pub admin: AdminUseCase,
    pub genres: GenreUseCase,
    pub tracks: TrackUseCase,
    pub provider: ProviderUseCase,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = memory_db().await;
        let user_repo = Arc::new(UserRepositoryImpl::new(db.clone()));
        let track_repo = Arc::new(TrackRepositoryImpl::new(db.clone()));
        let album_repo = Arc::new(AlbumRepositoryImpl::new(db.clone()));
        let playlist_repo = Arc::new(PlaylistRepositoryImpl::new(db.clone()));
        let coupon_repo = Arc::new(CouponRepositoryImpl::new(db.clone()));
        let banner_repo = Arc::new(BannerRepositoryImpl::new(db.clone()));
        let genre_repo = Arc::new(GenreRepositoryImpl::new(db.clone()));
        let verification_repo = Arc::new(VerificationRepositoryImpl::new(db.clone()));

        let email = Arc::new(RecordingEmailSender::default());
        let payments = Arc::new(FakePaymentGateway::default());
        let storage = Arc::new(InMemoryStorage::new());

        let auth = Arc::new(AuthUseCase::new(
            user_repo.clone(),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(JwtTokenService::new(&auth_settings())),
            Arc::new(OtpCache::new(Duration::from_secs(300), 6)),
            email.clone(),
            Arc::new(FakeGoogle),
            storage.clone(),
            300,
        ));
        let subscriptions = Arc::new(SubscriptionUseCase::new(
            user_repo.clone(),
            coupon_repo.clone(),
            payments.clone(),
            BillingOptions {
                client_url: "http://localhost:5173".to_string(),
                currency: "usd".to_string(),
                per_play_cents: PER_PLAY_CENTS,
            },
        ));

        let users = UserUseCase::new(
            auth.clone(),
            subscriptions.clone(),
            user_repo.clone(),
            track_repo.clone(),
            album_repo.clone(),
            playlist_repo.clone(),
            banner_repo.clone(),
            storage.clone(),
        );
        let artists = ArtistUseCase::new(
            auth.clone(),
            subscriptions.clone(),
            track_repo.clone(),
            album_repo.clone(),
            genre_repo.clone(),
            verification_repo.clone(),
            storage.clone(),
        );
        let admin = AdminUseCase::new(
            auth.clone(),
            subscriptions.clone(),
            user_repo.clone(),
            track_repo.clone(),
            coupon_repo.clone(),
            banner_repo.clone(),
            verification_repo.clone(),
            storage.clone(),
        );

        Self {
            genres: GenreUseCase::new(genre_repo.clone()),
            tracks: TrackUseCase::new(track_repo.clone()),
            provider: ProviderUseCase::new(auth.clone()),
            user_repo,
            track_repo,
            genre_repo,
            coupon_repo,
            album_repo,
            banner_repo,
            verification_repo,
            email,
            payments,
            storage,
            auth,
            subscriptions,
            users,
            artists,
            admin,
        }
    }

    /// 直接写入一个已验证的账号，密码为 [`TEST_PASSWORD`]
    pub async fn seed_user(&self, email: &str, role: UserRole) -> User {
        let hash = Argon2PasswordHasher::new().hash(TEST_PASSWORD).unwrap();
        let user = User::new("Seeded".to_string(), email.to_string(), Some(hash), role);
        self.user_repo.create(&user).await.unwrap()
    }

    pub async fn seed_genre(&self, name: &str) -> Genre {
        self.genre_repo.create(&Genre::new(name)).await.unwrap()
    }

    pub async fn seed_track(&self, artist_id: Uuid, title: &str, genres: &[&str]) -> Track {
        self.track_repo
            .create(NewTrack {
                title: title.to_string(),
                artist_id,
                genres: genres.iter().map(|g| g.to_string()).collect(),
                album_id: None,
                file_url: format!("memory://tracks/{}.mp3", title),
                image_url: None,
                duration_seconds: Some(180),
            })
            .await
            .unwrap()
    }

    pub async fn seed_plan(&self, name: &str, amount: i64) -> Plan {
        self.payments
            .create_plan(NewPlan {
                name: name.to_string(),
                description: None,
                amount,
                currency: "usd".to_string(),
                interval: BillingInterval::Month,
            })
            .await
            .unwrap()
    }
}
