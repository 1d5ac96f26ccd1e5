// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

use migration::{Migrator, MigratorTrait};
use xtaze::config::settings::Settings;
use xtaze::infrastructure::database::connection;
use xtaze::infrastructure::metrics::init_metrics;
use xtaze::infrastructure::services::deezer_client_impl::DeezerHttpClient;
use xtaze::infrastructure::services::email_sender_impl::build_email_sender;
use xtaze::infrastructure::services::google_identity_impl::GoogleTokenInfoClient;
use xtaze::infrastructure::services::otp_cache::OtpCache;
use xtaze::infrastructure::services::password_hasher_impl::Argon2PasswordHasher;
use xtaze::infrastructure::services::stripe_client::StripeClient;
use xtaze::infrastructure::services::token_service_impl::JwtTokenService;
use xtaze::infrastructure::storage::create_storage_service;
use xtaze::presentation::routes;
use xtaze::presentation::state::{AppState, Services};
use xtaze::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting xtaze...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    init_metrics(&settings.metrics);

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. External services
    let otp_cache = Arc::new(OtpCache::new(
        Duration::from_secs(settings.otp.ttl_seconds),
        settings.otp.length,
    ));
    otp_cache
        .clone()
        .spawn_sweeper(Duration::from_secs(settings.otp.sweep_interval_seconds));

    let services = Services {
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens: Arc::new(JwtTokenService::new(&settings.auth)),
        otp_store: otp_cache,
        email: build_email_sender(&settings.email),
        google: Arc::new(GoogleTokenInfoClient::new(&settings.google)),
        payments: Arc::new(StripeClient::new(&settings.stripe)),
        storage: create_storage_service(&settings.storage)?,
        deezer: Arc::new(DeezerHttpClient::new(&settings.deezer)),
    };
    info!("Storage backend: {}", settings.storage.storage_type);

    // 5. Start HTTP server
    let state = AppState::new(settings.clone(), db, services);
    let app = routes::routes(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
