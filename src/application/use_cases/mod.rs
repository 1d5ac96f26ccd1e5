// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 每个角色一个用例结构体，持有仓库与外部服务的 trait 对象
pub mod admin_use_case;
pub mod artist_use_case;
pub mod auth_use_case;
pub mod deezer_use_case;
pub mod genre_use_case;
pub mod provider_use_case;
pub mod subscription_use_case;
pub mod track_use_case;
pub mod user_use_case;

#[cfg(test)]
pub(crate) mod test_support;
