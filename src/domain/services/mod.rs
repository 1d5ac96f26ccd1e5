// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块定义了业务逻辑依赖的外部能力接口，具体实现位于基础设施层。
///
/// 包含的服务：
/// - 密码哈希（password_hasher）
/// - 令牌签发与校验（token_service）
/// - 一次性验证码存储（otp_store）
/// - 邮件发送（email_sender）
/// - 支付网关（payment_gateway）：订阅计划、结账会话、回调校验
/// - 资源存储（storage_service）：音频、封面和证件上传
/// - Google 身份校验（google_identity）
/// - Deezer 榜单（deezer_client）
pub mod deezer_client;
pub mod email_sender;
pub mod google_identity;
pub mod otp_store;
pub mod password_hasher;
pub mod payment_gateway;
pub mod storage_service;
pub mod token_service;
