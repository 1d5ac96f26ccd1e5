// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};

use crate::domain::models::user::UserRole;
use crate::presentation::handlers::user_handler;
use crate::presentation::middleware::auth_middleware::auth_middleware;
use crate::presentation::state::AppState;

/// `/user` 路由
pub fn user_routes(state: &AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/register", post(user_handler::register))
        .route("/verify-otp", post(user_handler::verify_otp))
        .route("/resend-otp", post(user_handler::resend_otp))
        .route("/login", post(user_handler::login))
        .route("/google-login", post(user_handler::google_login))
        .route("/refresh", post(user_handler::refresh))
        .route("/logout", post(user_handler::logout))
        .route("/forgot-password", post(user_handler::forgot_password))
        .route("/reset-password", post(user_handler::reset_password))
        .route("/plans", get(user_handler::plans));

    let protected_routes = Router::new()
        .route(
            "/profile",
            get(user_handler::profile).put(user_handler::update_profile),
        )
        .route("/change-password", put(user_handler::change_password))
        .route("/tracks/{track_id}/like", post(user_handler::toggle_like))
        .route("/liked-songs", get(user_handler::liked_songs))
        .route(
            "/playlists",
            get(user_handler::my_playlists).post(user_handler::create_playlist),
        )
        .route(
            "/playlists/{playlist_id}",
            get(user_handler::get_playlist)
                .put(user_handler::update_playlist)
                .delete(user_handler::delete_playlist),
        )
        .route(
            "/playlists/{playlist_id}/tracks",
            post(user_handler::add_track_to_playlist),
        )
        .route(
            "/playlists/{playlist_id}/tracks/{track_id}",
            delete(user_handler::remove_track_from_playlist),
        )
        .route("/albums", get(user_handler::albums))
        .route("/albums/{album_id}", get(user_handler::album))
        .route("/artists", get(user_handler::artists))
        .route("/artists/{artist_id}", get(user_handler::artist))
        .route("/search", get(user_handler::search))
        .route("/banners", get(user_handler::banners))
        .route("/coupons/verify", post(user_handler::verify_coupon))
        .route("/checkout", post(user_handler::checkout))
        .route(
            "/subscription/cancel",
            post(user_handler::cancel_subscription),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth.for_role(UserRole::User),
            auth_middleware,
        ));

    public_routes.merge(protected_routes)
}
