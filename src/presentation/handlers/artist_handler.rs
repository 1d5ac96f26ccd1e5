// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use super::{done, logout_response, ok, session_response, ApiResponse, ApiResult};
use crate::application::dto::auth_dto::{
    AuthResponse, EmailRequest, LoginRequest, RegisterRequest, VerifyOtpRequest,
};
use crate::application::dto::catalog_dto::{
    parse_genre_list, AlbumDto, CreateAlbumRequest, TrackDto, UpdateAlbumRequest,
    UpdateTrackRequest, UploadTrackRequest,
};
use crate::application::dto::payment_dto::{ArtistMonetizationDto, PayoutDto};
use crate::application::dto::user_dto::{UpdateProfileRequest, UserDto};
use crate::application::dto::verification_dto::VerificationStatusDto;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::multipart_form::MultipartForm;
use crate::presentation::extractors::refresh_cookie::refresh_token;
use crate::presentation::middleware::auth_middleware::AuthUser;
use crate::presentation::state::AppState;

type SessionResult = Result<(CookieJar, Json<ApiResponse<AuthResponse>>), AppError>;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    state.artists.register(payload).await?;
    Ok((StatusCode::CREATED, done("OTP sent to your email")))
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), AppError> {
    let artist = state.artists.verify_otp(payload).await?;
    Ok((StatusCode::CREATED, ok(artist)))
}

pub async fn resend_otp(
    State(state): State<AppState>,
    Json(payload): Json<EmailRequest>,
) -> ApiResult<()> {
    state.artists.auth().resend_otp(payload).await?;
    Ok(done("OTP resent successfully"))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> SessionResult {
    let session = state.artists.login(payload).await?;
    session_response(&state.settings, jar, session)
}

pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> SessionResult {
    let token = refresh_token(&jar);
    let session = state.artists.refresh(token.as_deref()).await?;
    session_response(&state.settings, jar, session)
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    logout_response(jar)
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
) -> ApiResult<UserDto> {
    Ok(ok(state.artists.profile(artist.id).await?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
    mut form: MultipartForm,
) -> ApiResult<UserDto> {
    let dto = UpdateProfileRequest {
        name: form.text("name"),
        bio: form.text("bio"),
    };
    let image = form.take_file("image");
    Ok(ok(state.artists.update_profile(artist.id, dto, image).await?))
}

/// multipart 字段：`title`、`genres`（JSON 数组或逗号分隔）、`albumId`，
/// 文件 `audio` 与 `image`
pub async fn upload_track(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
    mut form: MultipartForm,
) -> Result<(StatusCode, Json<ApiResponse<TrackDto>>), AppError> {
    let dto = UploadTrackRequest {
        title: form.required("title")?,
        genres: form
            .text("genres")
            .map(|raw| parse_genre_list(&raw))
            .unwrap_or_default(),
        album_id: form.parse("albumId")?,
    };
    let audio = form.take_file("audio");
    let image = form.take_file("image");

    let track = state
        .artists
        .upload_track(artist.id, dto, audio, image)
        .await?;
    Ok((StatusCode::CREATED, ok(track)))
}

/// `albumId` 传空值表示移出专辑，不传表示保持不变
pub async fn update_track(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
    Path(track_id): Path<Uuid>,
    mut form: MultipartForm,
) -> ApiResult<TrackDto> {
    let album_id = if form.has("albumId") {
        Some(form.parse("albumId")?)
    } else {
        None
    };
    let dto = UpdateTrackRequest {
        title: form.text("title"),
        genres: form.text("genres").map(|raw| parse_genre_list(&raw)),
        album_id,
    };
    let audio = form.take_file("audio");
    let image = form.take_file("image");

    let track = state
        .artists
        .update_track(artist.id, track_id, dto, audio, image)
        .await?;
    Ok(ok(track))
}

pub async fn delete_track(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
    Path(track_id): Path<Uuid>,
) -> ApiResult<()> {
    state.artists.delete_track(artist.id, track_id).await?;
    Ok(done("Track deleted successfully"))
}

pub async fn my_tracks(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
) -> ApiResult<Vec<TrackDto>> {
    Ok(ok(state.artists.my_tracks(artist.id).await?))
}

/// multipart 字段：`name`、`description`，文件 `cover`
pub async fn create_album(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
    mut form: MultipartForm,
) -> Result<(StatusCode, Json<ApiResponse<AlbumDto>>), AppError> {
    let dto = CreateAlbumRequest {
        name: form.required("name")?,
        description: form.text("description"),
    };
    let cover = form.take_file("cover");
    let album = state.artists.create_album(artist.id, dto, cover).await?;
    Ok((StatusCode::CREATED, ok(album)))
}

pub async fn my_albums(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
) -> ApiResult<Vec<AlbumDto>> {
    Ok(ok(state.artists.my_albums(artist.id).await?))
}

pub async fn update_album(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
    Path(album_id): Path<Uuid>,
    mut form: MultipartForm,
) -> ApiResult<AlbumDto> {
    let dto = UpdateAlbumRequest {
        name: form.text("name"),
        description: form.text("description"),
    };
    let cover = form.take_file("cover");
    let album = state
        .artists
        .update_album(artist.id, album_id, dto, cover)
        .await?;
    Ok(ok(album))
}

pub async fn delete_album(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
    Path(album_id): Path<Uuid>,
) -> ApiResult<()> {
    state.artists.delete_album(artist.id, album_id).await?;
    Ok(done("Album deleted successfully"))
}

pub async fn monetization(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
) -> ApiResult<ArtistMonetizationDto> {
    Ok(ok(state.artists.monetization(artist.id).await?))
}

pub async fn payout(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
) -> ApiResult<PayoutDto> {
    Ok(ok(state.artists.payout(artist.id).await?))
}

/// 文件字段 `document`
pub async fn submit_verification(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
    mut form: MultipartForm,
) -> Result<(StatusCode, Json<ApiResponse<VerificationStatusDto>>), AppError> {
    let document = form.take_file("document");
    let status = state
        .artists
        .submit_verification(artist.id, document)
        .await?;
    Ok((StatusCode::CREATED, ok(status)))
}

pub async fn verification_status(
    State(state): State<AppState>,
    Extension(artist): Extension<AuthUser>,
) -> ApiResult<VerificationStatusDto> {
    Ok(ok(state.artists.verification_status(artist.id).await?))
}
