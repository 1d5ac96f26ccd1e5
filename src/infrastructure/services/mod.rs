// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施服务模块
///
/// 领域服务接口的具体实现：密码哈希、令牌、验证码缓存、邮件、
/// Stripe 支付、Google 身份校验与 Deezer 榜单
pub mod deezer_client_impl;
pub mod email_sender_impl;
pub mod google_identity_impl;
pub mod otp_cache;
pub mod password_hasher_impl;
pub mod stripe_client;
pub mod token_service_impl;
