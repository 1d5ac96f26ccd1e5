// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::routing::{get, post};
use axum::{middleware, Router};

use crate::domain::models::user::UserRole;
use crate::presentation::handlers::{provider_handler, song_handler};
use crate::presentation::middleware::auth_middleware::auth_middleware;
use crate::presentation::state::AppState;

/// `/api/songs` 路由，播放计数需要登录（任意角色）
pub fn song_routes(state: &AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/", get(song_handler::list))
        .route("/deezer", get(song_handler::deezer_previews))
        .route("/genres", get(song_handler::genres))
        .route("/{track_id}", get(song_handler::get));

    let protected_routes = Router::new()
        .route("/{track_id}/play", post(song_handler::increment_play))
        .route_layer(middleware::from_fn_with_state(
            state.auth.any_role(),
            auth_middleware,
        ));

    public_routes.merge(protected_routes)
}

/// `/provider` 路由
pub fn provider_routes(state: &AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/login", post(provider_handler::login))
        .route("/refresh", post(provider_handler::refresh))
        .route("/logout", post(provider_handler::logout));

    let protected_routes = Router::new()
        .route("/profile", get(provider_handler::profile))
        .route_layer(middleware::from_fn_with_state(
            state.auth.for_role(UserRole::Provider),
            auth_middleware,
        ));

    public_routes.merge(protected_routes)
}
