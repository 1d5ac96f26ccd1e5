// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 各角色的用例与请求、响应 DTO
pub mod dto;
pub mod use_cases;
