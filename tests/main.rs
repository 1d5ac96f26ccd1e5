// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 测试主模块
///
/// 通过完整路由驱动 HTTP 接口，数据库为内存 SQLite，外部服务由 wiremock 模拟
mod integration;
