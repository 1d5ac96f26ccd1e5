// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 用户（user）：普通用户、艺术家、管理员与服务商账号
/// - 歌曲（track）：上传的音频及其按月播放统计
/// - 专辑与播放列表（album、playlist）：有序的歌曲集合
/// - 优惠券与横幅（coupon、banner）：运营推广数据
/// - 流派（genre）与艺术家认证（verification）
/// - 支付（payment）与收益（monetization）：订阅套餐、结算会话与播放收益
pub mod album;
pub mod banner;
pub mod coupon;
pub mod genre;
pub mod monetization;
pub mod payment;
pub mod playlist;
pub mod track;
pub mod user;
pub mod verification;
