// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod admin_test;
pub mod artist_test;
pub mod auth_flow_test;
pub mod catalog_test;
pub mod health_check;
pub mod helpers;
pub mod subscription_test;
pub mod webhook_test;
