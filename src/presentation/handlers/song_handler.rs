// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Path, Query, State};
use uuid::Uuid;

use super::{ok, ApiResult};
use crate::application::dto::catalog_dto::{PlayCountDto, TrackDto, TrackQuery};
use crate::application::dto::genre_dto::GenreDto;
use crate::application::dto::preview_dto::{PreviewQuery, PreviewTrackDto};
use crate::presentation::middleware::auth_middleware::AuthUser;
use crate::presentation::state::AppState;
use crate::utils::pagination::Page;

/// 歌曲列表，支持 `search` 与 `genre` 过滤
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TrackQuery>,
) -> ApiResult<Page<TrackDto>> {
    Ok(ok(state.tracks.list(&query).await?))
}

pub async fn get(State(state): State<AppState>, Path(track_id): Path<Uuid>) -> ApiResult<TrackDto> {
    Ok(ok(state.tracks.get(track_id).await?))
}

/// 记录一次播放，任何已登录角色都可以调用
pub async fn increment_play(
    State(state): State<AppState>,
    Extension(listener): Extension<AuthUser>,
    Path(track_id): Path<Uuid>,
) -> ApiResult<PlayCountDto> {
    Ok(ok(state.tracks.increment_play(track_id, listener.id).await?))
}

/// 访客试听榜单
pub async fn deezer_previews(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> ApiResult<Vec<PreviewTrackDto>> {
    Ok(ok(state.deezer.preview_tracks(query.limit).await?))
}

pub async fn genres(State(state): State<AppState>) -> ApiResult<Vec<GenreDto>> {
    Ok(ok(state.genres.active().await?))
}
