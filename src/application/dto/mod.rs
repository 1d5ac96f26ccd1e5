// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 请求体的校验结构（validator）与返回给客户端的响应视图
pub mod admin_dto;
pub mod auth_dto;
pub mod catalog_dto;
pub mod genre_dto;
pub mod payment_dto;
pub mod playlist_dto;
pub mod preview_dto;
pub mod promotion_dto;
pub mod user_dto;
pub mod verification_dto;
