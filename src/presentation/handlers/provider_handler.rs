// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, State};
use axum_extra::extract::cookie::CookieJar;

use super::{logout_response, ok, session_response, ApiResponse, ApiResult};
use crate::application::dto::auth_dto::{AuthResponse, LoginRequest};
use crate::application::dto::user_dto::UserDto;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::refresh_cookie::refresh_token;
use crate::presentation::middleware::auth_middleware::AuthUser;
use crate::presentation::state::AppState;

type SessionResult = Result<(CookieJar, Json<ApiResponse<AuthResponse>>), AppError>;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> SessionResult {
    let session = state.provider.login(payload).await?;
    session_response(&state.settings, jar, session)
}

pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> SessionResult {
    let token = refresh_token(&jar);
    let session = state.provider.refresh(token.as_deref()).await?;
    session_response(&state.settings, jar, session)
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    logout_response(jar)
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(provider): Extension<AuthUser>,
) -> ApiResult<UserDto> {
    Ok(ok(state.provider.profile(provider.id).await?))
}
