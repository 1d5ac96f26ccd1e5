// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 每个聚合一个仓库，具体实现由基础设施层基于 SeaORM 提供：
/// - 用户（user_repository）：账号资料与喜欢的歌曲
/// - 歌曲（track_repository）：歌曲、监听者与按月播放计数
/// - 专辑（album_repository）、播放列表（playlist_repository）
/// - 优惠券（coupon_repository）、横幅（banner_repository）
/// - 流派（genre_repository）、艺术家认证（verification_repository）
pub mod album_repository;
pub mod banner_repository;
pub mod coupon_repository;
pub mod genre_repository;
pub mod playlist_repository;
pub mod track_repository;
pub mod user_repository;
pub mod verification_repository;
