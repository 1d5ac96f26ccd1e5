// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xtaze::config::settings::Settings;
use xtaze::domain::models::genre::Genre;
use xtaze::domain::models::track::{NewTrack, Track};
use xtaze::domain::models::user::{User, UserRole};
use xtaze::domain::repositories::genre_repository::GenreRepository;
use xtaze::domain::repositories::track_repository::TrackRepository;
use xtaze::domain::repositories::user_repository::UserRepository;
use xtaze::domain::services::password_hasher::PasswordHasher;
use xtaze::infrastructure::database::connection::create_pool;
use xtaze::infrastructure::repositories::coupon_repo_impl::CouponRepositoryImpl;
use xtaze::infrastructure::repositories::genre_repo_impl::GenreRepositoryImpl;
use xtaze::infrastructure::repositories::track_repo_impl::TrackRepositoryImpl;
use xtaze::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use xtaze::infrastructure::services::deezer_client_impl::DeezerHttpClient;
use xtaze::infrastructure::services::email_sender_impl::build_email_sender;
use xtaze::infrastructure::services::google_identity_impl::GoogleTokenInfoClient;
use xtaze::infrastructure::services::otp_cache::OtpCache;
use xtaze::infrastructure::services::password_hasher_impl::Argon2PasswordHasher;
use xtaze::infrastructure::services::stripe_client::StripeClient;
use xtaze::infrastructure::services::token_service_impl::JwtTokenService;
use xtaze::infrastructure::storage::InMemoryStorage;
use xtaze::presentation::routes;
use xtaze::presentation::state::{AppState, Services};

pub const PASSWORD: &str = "password1";
pub const WEBHOOK_SECRET: &str = "whsec_integration";
pub const GOOGLE_CLIENT_ID: &str = "xtaze-test-client";

/// 完整路由 + 内存 SQLite，外部 HTTP 服务全部指向同一个 wiremock
#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub external: MockServer,
    pub db: Arc<DatabaseConnection>,
    pub settings: Arc<Settings>,
    pub users: Arc<UserRepositoryImpl>,
    pub tracks: Arc<TrackRepositoryImpl>,
    pub genres: Arc<GenreRepositoryImpl>,
    pub coupons: Arc<CouponRepositoryImpl>,
    pub storage: Arc<InMemoryStorage>,
}

fn test_settings(external: &str) -> Settings {
    Settings::builder()
        .unwrap()
        .set_override("database.url", "sqlite::memory:")
        .unwrap()
        .set_override("auth.access_secret", "integration-access")
        .unwrap()
        .set_override("auth.refresh_secret", "integration-refresh")
        .unwrap()
        .set_override("stripe.api_base", external)
        .unwrap()
        .set_override("stripe.secret_key", "sk_test_integration")
        .unwrap()
        .set_override("stripe.webhook_secret", WEBHOOK_SECRET)
        .unwrap()
        .set_override("email.provider", "http")
        .unwrap()
        .set_override("email.api_url", format!("{}/email", external))
        .unwrap()
        .set_override("google.client_id", GOOGLE_CLIENT_ID)
        .unwrap()
        .set_override("google.tokeninfo_url", format!("{}/tokeninfo", external))
        .unwrap()
        .set_override("deezer.api_base", external)
        .unwrap()
        .set_override("storage.storage_type", "memory")
        .unwrap()
        .set_override("metrics.enabled", false)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

impl TestApp {
    pub async fn spawn() -> Self {
        let external = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/email"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "mail_1"})))
            .mount(&external)
            .await;

        let settings = Arc::new(test_settings(&external.uri()));
        let db = create_pool(&settings.database).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let db = Arc::new(db);

        let storage = Arc::new(InMemoryStorage::new());
        let services = Services {
            hasher: Arc::new(Argon2PasswordHasher::new()),
            tokens: Arc::new(JwtTokenService::new(&settings.auth)),
            otp_store: Arc::new(OtpCache::new(
                Duration::from_secs(settings.otp.ttl_seconds),
                settings.otp.length,
            )),
            email: build_email_sender(&settings.email),
            google: Arc::new(GoogleTokenInfoClient::new(&settings.google)),
            payments: Arc::new(StripeClient::new(&settings.stripe)),
            storage: storage.clone(),
            deezer: Arc::new(DeezerHttpClient::new(&settings.deezer)),
        };

        let state = AppState::new(settings.clone(), db.clone(), services);
        let server = TestServer::new(routes::routes(state)).unwrap();

        Self {
            server,
            external,
            users: Arc::new(UserRepositoryImpl::new(db.clone())),
            tracks: Arc::new(TrackRepositoryImpl::new(db.clone())),
            genres: Arc::new(GenreRepositoryImpl::new(db.clone())),
            coupons: Arc::new(CouponRepositoryImpl::new(db.clone())),
            storage,
            settings,
            db,
        }
    }

    /// 直接写入一个已验证账号，密码为 [`PASSWORD`]
    pub async fn seed_user(&self, email: &str, role: UserRole) -> User {
        let hash = Argon2PasswordHasher::new().hash(PASSWORD).unwrap();
        let user = User::new("Seeded".to_string(), email.to_string(), Some(hash), role);
        self.users.create(&user).await.unwrap()
    }

    pub async fn seed_genre(&self, name: &str) -> Genre {
        self.genres.create(&Genre::new(name)).await.unwrap()
    }

    pub async fn seed_track(&self, artist_id: Uuid, title: &str) -> Track {
        self.tracks
            .create(NewTrack {
                title: title.to_string(),
                artist_id,
                genres: vec!["pop".to_string()],
                album_id: None,
                file_url: format!("memory://tracks/{}.mp3", title),
                image_url: None,
                duration_seconds: Some(200),
            })
            .await
            .unwrap()
    }

    /// 登录并返回访问令牌，`scope` 为 `user`、`artist`、`admin` 或 `provider`
    pub async fn login(&self, scope: &str, email: &str) -> String {
        let response = self
            .server
            .post(&format!("/{}/login", scope))
            .json(&json!({ "email": email, "password": PASSWORD }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        body["data"]["accessToken"].as_str().unwrap().to_string()
    }

    /// 最近一封发往该邮箱的验证码
    pub async fn otp_sent_to(&self, email: &str) -> Option<String> {
        let requests = self.external.received_requests().await.unwrap_or_default();
        requests
            .iter()
            .rev()
            .filter(|r| r.url.path() == "/email")
            .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
            .find(|mail| mail["to"][0] == email)
            .and_then(|mail| {
                mail["text"].as_str().and_then(|text| {
                    text.split_whitespace()
                        .map(|word| word.trim_end_matches('.'))
                        .find(|word| word.len() >= 4 && word.chars().all(|c| c.is_ascii_digit()))
                        .map(str::to_string)
                })
            })
    }
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    )
}

/// 以当前时间签名的 `Stripe-Signature` 头
pub fn stripe_signature(secret: &str, payload: &[u8]) -> HeaderValue {
    signed_at(secret, Utc::now().timestamp(), payload)
}

pub fn signed_at(secret: &str, timestamp: i64, payload: &[u8]) -> HeaderValue {
    let header = StripeClient::signature_header(secret, timestamp, payload).unwrap();
    HeaderValue::from_str(&header).unwrap()
}
