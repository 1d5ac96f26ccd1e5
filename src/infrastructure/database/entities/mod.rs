// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库实体模块
///
/// 定义数据库表对应的实体结构
/// 使用SeaORM框架进行对象关系映射
/// 集合类关系（喜欢、监听、优惠券使用）以联合主键的关联表存储
pub mod album;
pub mod banner;
pub mod coupon;
pub mod coupon_usage;
pub mod genre;
pub mod playlist;
pub mod track;
pub mod track_listener;
pub mod track_play_history;
pub mod user;
pub mod user_liked_song;
pub mod verification_request;
