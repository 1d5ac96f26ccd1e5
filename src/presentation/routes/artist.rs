// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::routing::{get, post, put};
use axum::{middleware, Router};

use crate::domain::models::user::UserRole;
use crate::presentation::handlers::artist_handler;
use crate::presentation::middleware::auth_middleware::auth_middleware;
use crate::presentation::state::AppState;

/// `/artist` 路由
pub fn artist_routes(state: &AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/register", post(artist_handler::register))
        .route("/verify-otp", post(artist_handler::verify_otp))
        .route("/resend-otp", post(artist_handler::resend_otp))
        .route("/login", post(artist_handler::login))
        .route("/refresh", post(artist_handler::refresh))
        .route("/logout", post(artist_handler::logout));

    let protected_routes = Router::new()
        .route(
            "/profile",
            get(artist_handler::profile).put(artist_handler::update_profile),
        )
        .route(
            "/tracks",
            get(artist_handler::my_tracks).post(artist_handler::upload_track),
        )
        .route(
            "/tracks/{track_id}",
            put(artist_handler::update_track).delete(artist_handler::delete_track),
        )
        .route(
            "/albums",
            get(artist_handler::my_albums).post(artist_handler::create_album),
        )
        .route(
            "/albums/{album_id}",
            put(artist_handler::update_album).delete(artist_handler::delete_album),
        )
        .route("/monetization", get(artist_handler::monetization))
        .route("/payout", post(artist_handler::payout))
        .route(
            "/verification",
            get(artist_handler::verification_status).post(artist_handler::submit_verification),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth.for_role(UserRole::Artist),
            auth_middleware,
        ));

    public_routes.merge(protected_routes)
}
