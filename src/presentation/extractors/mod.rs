// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 请求提取器
///
/// multipart 表单读取与刷新令牌 Cookie 的读写
pub mod multipart_form;
pub mod refresh_cookie;
