// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use super::{done, logout_response, ok, session_response, ApiResponse, ApiResult};
use crate::application::dto::auth_dto::{
    AuthResponse, ChangePasswordRequest, EmailRequest, GoogleLoginRequest, LoginRequest,
    RegisterRequest, ResetPasswordRequest, VerifyOtpRequest,
};
use crate::application::dto::catalog_dto::{
    AlbumDetailDto, AlbumDto, ArtistDetailDto, LikeDto, SearchQuery, SearchResultDto, TrackDto,
};
use crate::application::dto::payment_dto::{CheckoutRequest, CheckoutResponse};
use crate::application::dto::playlist_dto::{
    CreatePlaylistRequest, PlaylistDetailDto, PlaylistDto, PlaylistTrackRequest,
    UpdatePlaylistRequest,
};
use crate::application::dto::promotion_dto::{BannerDto, CouponCheckDto, CouponCodeRequest};
use crate::application::dto::user_dto::{ArtistDto, UpdateProfileRequest, UserDto};
use crate::domain::models::payment::Plan;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::multipart_form::MultipartForm;
use crate::presentation::extractors::refresh_cookie::refresh_token;
use crate::presentation::middleware::auth_middleware::AuthUser;
use crate::presentation::state::AppState;
use crate::utils::pagination::{Page, PageQuery};

type SessionResult = Result<(CookieJar, Json<ApiResponse<AuthResponse>>), AppError>;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    state.users.register(payload).await?;
    Ok((StatusCode::CREATED, done("OTP sent to your email")))
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), AppError> {
    let user = state.users.verify_otp(payload).await?;
    Ok((StatusCode::CREATED, ok(user)))
}

pub async fn resend_otp(
    State(state): State<AppState>,
    Json(payload): Json<EmailRequest>,
) -> ApiResult<()> {
    state.users.resend_otp(payload).await?;
    Ok(done("OTP resent successfully"))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> SessionResult {
    let session = state.users.login(payload).await?;
    session_response(&state.settings, jar, session)
}

pub async fn google_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<GoogleLoginRequest>,
) -> SessionResult {
    let session = state.users.google_login(payload).await?;
    session_response(&state.settings, jar, session)
}

pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> SessionResult {
    let token = refresh_token(&jar);
    let session = state.users.refresh(token.as_deref()).await?;
    session_response(&state.settings, jar, session)
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    logout_response(jar)
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<EmailRequest>,
) -> ApiResult<()> {
    state.users.forgot_password(payload).await?;
    Ok(done("OTP sent to your email"))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> ApiResult<()> {
    state.users.reset_password(payload).await?;
    Ok(done("Password reset successfully"))
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<UserDto> {
    Ok(ok(state.users.profile(user.id).await?))
}

/// multipart 字段：`name`、`bio`，文件 `image`
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut form: MultipartForm,
) -> ApiResult<UserDto> {
    let dto = UpdateProfileRequest {
        name: form.text("name"),
        bio: form.text("bio"),
    };
    let image = form.take_file("image");
    Ok(ok(state.users.update_profile(user.id, dto, image).await?))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<()> {
    state.users.change_password(user.id, payload).await?;
    Ok(done("Password changed successfully"))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(track_id): Path<Uuid>,
) -> ApiResult<LikeDto> {
    Ok(ok(state.users.toggle_like(user.id, track_id).await?))
}

pub async fn liked_songs(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<TrackDto>> {
    Ok(ok(state.users.liked_songs(user.id).await?))
}

pub async fn create_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlaylistDto>>), AppError> {
    let playlist = state.users.create_playlist(user.id, payload).await?;
    Ok((StatusCode::CREATED, ok(playlist)))
}

pub async fn my_playlists(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<PlaylistDto>> {
    Ok(ok(state.users.my_playlists(user.id, &query).await?))
}

pub async fn get_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
) -> ApiResult<PlaylistDetailDto> {
    Ok(ok(state.users.get_playlist(playlist_id).await?))
}

/// multipart 字段：`name`、`description`，文件 `image`
pub async fn update_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(playlist_id): Path<Uuid>,
    mut form: MultipartForm,
) -> ApiResult<PlaylistDto> {
    let dto = UpdatePlaylistRequest {
        name: form.text("name"),
        description: form.text("description"),
    };
    let image = form.take_file("image");
    let playlist = state
        .users
        .update_playlist(user.id, playlist_id, dto, image)
        .await?;
    Ok(ok(playlist))
}

pub async fn delete_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(playlist_id): Path<Uuid>,
) -> ApiResult<()> {
    state.users.delete_playlist(user.id, playlist_id).await?;
    Ok(done("Playlist deleted successfully"))
}

pub async fn add_track_to_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(playlist_id): Path<Uuid>,
    Json(payload): Json<PlaylistTrackRequest>,
) -> ApiResult<PlaylistDto> {
    let playlist = state
        .users
        .add_track_to_playlist(user.id, playlist_id, payload.track_id)
        .await?;
    Ok(ok(playlist))
}

pub async fn remove_track_from_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((playlist_id, track_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<PlaylistDto> {
    let playlist = state
        .users
        .remove_track_from_playlist(user.id, playlist_id, track_id)
        .await?;
    Ok(ok(playlist))
}

pub async fn albums(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<AlbumDto>> {
    Ok(ok(state.users.albums(&query).await?))
}

pub async fn album(
    State(state): State<AppState>,
    Path(album_id): Path<Uuid>,
) -> ApiResult<AlbumDetailDto> {
    Ok(ok(state.users.album(album_id).await?))
}

pub async fn artists(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<ArtistDto>> {
    Ok(ok(state.users.artists(&query).await?))
}

pub async fn artist(
    State(state): State<AppState>,
    Path(artist_id): Path<Uuid>,
) -> ApiResult<ArtistDetailDto> {
    Ok(ok(state.users.artist(artist_id).await?))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<SearchResultDto> {
    Ok(ok(state.users.search(query.q.as_deref()).await?))
}

pub async fn banners(State(state): State<AppState>) -> ApiResult<Vec<BannerDto>> {
    Ok(ok(state.users.active_banners().await?))
}

pub async fn plans(State(state): State<AppState>) -> ApiResult<Vec<Plan>> {
    Ok(ok(state.users.plans().await?))
}

pub async fn verify_coupon(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CouponCodeRequest>,
) -> ApiResult<CouponCheckDto> {
    Ok(ok(state.users.verify_coupon(user.id, payload).await?))
}

pub async fn checkout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CheckoutRequest>,
) -> ApiResult<CheckoutResponse> {
    Ok(ok(state.users.checkout(user.id, payload).await?))
}

pub async fn cancel_subscription(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<UserDto> {
    Ok(ok(state.users.cancel_subscription(user.id).await?))
}
