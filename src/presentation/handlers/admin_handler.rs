// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use super::{done, logout_response, ok, session_response, ApiResponse, ApiResult};
use crate::application::dto::admin_dto::DashboardDto;
use crate::application::dto::auth_dto::{AuthResponse, LoginRequest};
use crate::application::dto::genre_dto::{GenreDto, GenreRequest};
use crate::application::dto::payment_dto::{CreatePlanRequest, UpdatePlanRequest};
use crate::application::dto::promotion_dto::{
    BannerDto, CouponDto, CreateBannerRequest, CreateCouponRequest, UpdateBannerRequest,
    UpdateCouponRequest,
};
use crate::application::dto::user_dto::UserDto;
use crate::application::dto::verification_dto::{
    ReviewVerificationRequest, VerificationDto, VerificationQuery,
};
use crate::domain::models::monetization::TrackMonetization;
use crate::domain::models::payment::Plan;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::multipart_form::MultipartForm;
use crate::presentation::extractors::refresh_cookie::refresh_token;
use crate::presentation::middleware::auth_middleware::AuthUser;
use crate::presentation::state::AppState;
use crate::utils::pagination::{Page, PageQuery};

type SessionResult = Result<(CookieJar, Json<ApiResponse<AuthResponse>>), AppError>;
type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> SessionResult {
    let session = state.admin.login(payload).await?;
    session_response(&state.settings, jar, session)
}

pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> SessionResult {
    let token = refresh_token(&jar);
    let session = state.admin.refresh(token.as_deref()).await?;
    session_response(&state.settings, jar, session)
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    logout_response(jar)
}

pub async fn dashboard(State(state): State<AppState>) -> ApiResult<DashboardDto> {
    Ok(ok(state.admin.dashboard().await?))
}

pub async fn users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<UserDto>> {
    Ok(ok(state.admin.users(&query).await?))
}

pub async fn artists(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<UserDto>> {
    Ok(ok(state.admin.artists(&query).await?))
}

pub async fn toggle_ban(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<UserDto> {
    Ok(ok(state.admin.toggle_ban(user_id).await?))
}

// ---- 优惠券 ----

pub async fn create_coupon(
    State(state): State<AppState>,
    Json(payload): Json<CreateCouponRequest>,
) -> Created<CouponDto> {
    let coupon = state.admin.create_coupon(payload).await?;
    Ok((StatusCode::CREATED, ok(coupon)))
}

pub async fn coupons(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<CouponDto>> {
    Ok(ok(state.admin.coupons(&query).await?))
}

pub async fn update_coupon(
    State(state): State<AppState>,
    Path(coupon_id): Path<Uuid>,
    Json(payload): Json<UpdateCouponRequest>,
) -> ApiResult<CouponDto> {
    Ok(ok(state.admin.update_coupon(coupon_id, payload).await?))
}

pub async fn delete_coupon(
    State(state): State<AppState>,
    Path(coupon_id): Path<Uuid>,
) -> ApiResult<()> {
    state.admin.delete_coupon(coupon_id).await?;
    Ok(done("Coupon deleted successfully"))
}

// ---- 横幅 ----

/// multipart 字段：`title`、`description`、`action`，文件 `image`
pub async fn create_banner(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthUser>,
    mut form: MultipartForm,
) -> Created<BannerDto> {
    let dto = CreateBannerRequest {
        title: form.required("title")?,
        description: form.text("description"),
        action: form.text("action"),
    };
    let image = form.take_file("image");
    let banner = state.admin.create_banner(admin.id, dto, image).await?;
    Ok((StatusCode::CREATED, ok(banner)))
}

pub async fn banners(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<BannerDto>> {
    Ok(ok(state.admin.banners(&query).await?))
}

pub async fn update_banner(
    State(state): State<AppState>,
    Path(banner_id): Path<Uuid>,
    mut form: MultipartForm,
) -> ApiResult<BannerDto> {
    let dto = UpdateBannerRequest {
        title: form.text("title"),
        description: form.text("description"),
        action: form.text("action"),
        is_active: form.parse("isActive")?,
    };
    let image = form.take_file("image");
    Ok(ok(state.admin.update_banner(banner_id, dto, image).await?))
}

pub async fn delete_banner(
    State(state): State<AppState>,
    Path(banner_id): Path<Uuid>,
) -> ApiResult<()> {
    state.admin.delete_banner(banner_id).await?;
    Ok(done("Banner deleted successfully"))
}

// ---- 艺术家认证 ----

pub async fn verification_requests(
    State(state): State<AppState>,
    Query(query): Query<VerificationQuery>,
) -> ApiResult<Page<VerificationDto>> {
    Ok(ok(state.admin.verification_requests(&query).await?))
}

pub async fn review_verification(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<ReviewVerificationRequest>,
) -> ApiResult<VerificationDto> {
    Ok(ok(state.admin.review_verification(request_id, payload).await?))
}

// ---- 订阅套餐 ----

pub async fn create_plan(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlanRequest>,
) -> Created<Plan> {
    let plan = state.admin.create_plan(payload).await?;
    Ok((StatusCode::CREATED, ok(plan)))
}

pub async fn plans(State(state): State<AppState>) -> ApiResult<Vec<Plan>> {
    Ok(ok(state.admin.plans().await?))
}

pub async fn update_plan(
    State(state): State<AppState>,
    Path(price_id): Path<String>,
    Json(payload): Json<UpdatePlanRequest>,
) -> ApiResult<Plan> {
    Ok(ok(state.admin.update_plan(&price_id, payload).await?))
}

pub async fn archive_plan(
    State(state): State<AppState>,
    Path(price_id): Path<String>,
) -> ApiResult<()> {
    state.admin.archive_plan(&price_id).await?;
    Ok(done("Plan archived successfully"))
}

pub async fn music_monetization(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<TrackMonetization>> {
    Ok(ok(state.admin.music_monetization(&query).await?))
}

// ---- 流派 ----

pub async fn create_genre(
    State(state): State<AppState>,
    Json(payload): Json<GenreRequest>,
) -> Created<GenreDto> {
    let genre = state.genres.create(payload).await?;
    Ok((StatusCode::CREATED, ok(genre)))
}

pub async fn genres(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<GenreDto>> {
    Ok(ok(state.genres.list(&query).await?))
}

pub async fn update_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<Uuid>,
    Json(payload): Json<GenreRequest>,
) -> ApiResult<GenreDto> {
    Ok(ok(state.genres.update(genre_id, payload).await?))
}

pub async fn toggle_genre_block(
    State(state): State<AppState>,
    Path(genre_id): Path<Uuid>,
) -> ApiResult<GenreDto> {
    Ok(ok(state.genres.toggle_block(genre_id).await?))
}

pub async fn delete_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<Uuid>,
) -> ApiResult<()> {
    state.genres.delete(genre_id).await?;
    Ok(done("Genre deleted successfully"))
}
