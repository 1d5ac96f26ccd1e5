// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::routing::{get, patch, post, put};
use axum::{middleware, Router};

use crate::domain::models::user::UserRole;
use crate::presentation::handlers::admin_handler;
use crate::presentation::middleware::auth_middleware::auth_middleware;
use crate::presentation::state::AppState;

/// `/admin` 路由，管理员账号只能通过种子数据创建
pub fn admin_routes(state: &AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/login", post(admin_handler::login))
        .route("/refresh", post(admin_handler::refresh))
        .route("/logout", post(admin_handler::logout));

    let protected_routes = Router::new()
        .route("/dashboard", get(admin_handler::dashboard))
        .route("/users", get(admin_handler::users))
        .route("/artists", get(admin_handler::artists))
        .route("/users/{user_id}/ban", patch(admin_handler::toggle_ban))
        .route(
            "/coupons",
            get(admin_handler::coupons).post(admin_handler::create_coupon),
        )
        .route(
            "/coupons/{coupon_id}",
            put(admin_handler::update_coupon).delete(admin_handler::delete_coupon),
        )
        .route(
            "/banners",
            get(admin_handler::banners).post(admin_handler::create_banner),
        )
        .route(
            "/banners/{banner_id}",
            put(admin_handler::update_banner).delete(admin_handler::delete_banner),
        )
        .route(
            "/verifications",
            get(admin_handler::verification_requests),
        )
        .route(
            "/verifications/{request_id}",
            patch(admin_handler::review_verification),
        )
        .route(
            "/plans",
            get(admin_handler::plans).post(admin_handler::create_plan),
        )
        .route(
            "/plans/{price_id}",
            put(admin_handler::update_plan).delete(admin_handler::archive_plan),
        )
        .route("/monetization", get(admin_handler::music_monetization))
        .route(
            "/genres",
            get(admin_handler::genres).post(admin_handler::create_genre),
        )
        .route(
            "/genres/{genre_id}",
            put(admin_handler::update_genre).delete(admin_handler::delete_genre),
        )
        .route(
            "/genres/{genre_id}/block",
            patch(admin_handler::toggle_genre_block),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth.for_role(UserRole::Admin),
            auth_middleware,
        ));

    public_routes.merge(protected_routes)
}
