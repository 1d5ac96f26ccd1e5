// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::genre::Genre;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct GenreRequest {
    #[validate(length(min = 1, max = 50, message = "Genre name must be between 1 and 50 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreDto {
    pub id: Uuid,
    pub name: String,
    pub is_blocked: bool,
    pub created_at: DateTime<FixedOffset>,
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
            is_blocked: genre.is_blocked,
            created_at: genre.created_at,
        }
    }
}
