// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::genre_dto::{GenreDto, GenreRequest};
use crate::domain::models::genre::{normalize_genre_name, Genre};
use crate::domain::repositories::genre_repository::GenreRepository;
use crate::utils::errors::{DomainError, DomainResult};
use crate::utils::pagination::{Page, PageQuery};

pub struct GenreUseCase {
    genres: Arc<dyn GenreRepository>,
}

impl GenreUseCase {
    pub fn new(genres: Arc<dyn GenreRepository>) -> Self {
        Self { genres }
    }

    pub async fn create(&self, dto: GenreRequest) -> DomainResult<GenreDto> {
        dto.validate()?;
        let name = self.available_name(&dto.name, None).await?;
        let genre = self.genres.create(&Genre::new(&name)).await?;
        info!("Created genre {}", genre.name);
        Ok(genre.into())
    }

    pub async fn list(&self, query: &PageQuery) -> DomainResult<Page<GenreDto>> {
        let (items, total) = self.genres.list(query).await?;
        Ok(Page::new(items, total, query).map(Into::into))
    }

    pub async fn update(&self, genre_id: Uuid, dto: GenreRequest) -> DomainResult<GenreDto> {
        dto.validate()?;
        let mut genre = self.find(genre_id).await?;
        genre.name = self.available_name(&dto.name, Some(genre.id)).await?;
        genre.updated_at = Utc::now().fixed_offset();
        Ok(self.genres.update(&genre).await?.into())
    }

    pub async fn toggle_block(&self, genre_id: Uuid) -> DomainResult<GenreDto> {
        let mut genre = self.find(genre_id).await?;
        genre.is_blocked = !genre.is_blocked;
        genre.updated_at = Utc::now().fixed_offset();
        let genre = self.genres.update(&genre).await?;
        info!("Genre {} blocked: {}", genre.name, genre.is_blocked);
        Ok(genre.into())
    }

    pub async fn delete(&self, genre_id: Uuid) -> DomainResult<()> {
        let genre = self.find(genre_id).await?;
        self.genres.delete(genre.id).await?;
        Ok(())
    }

    /// 未屏蔽的流派，供上传页面选择
    pub async fn active(&self) -> DomainResult<Vec<GenreDto>> {
        let genres = self.genres.list_active().await?;
        Ok(genres.into_iter().map(Into::into).collect())
    }

    /// 规范化名称并检查大小写不敏感的重名，`current` 为正在修改的流派
    async fn available_name(&self, raw: &str, current: Option<Uuid>) -> DomainResult<String> {
        let name = normalize_genre_name(raw);
        if name.is_empty() {
            return Err(DomainError::Validation("Genre name is required".to_string()));
        }
        if let Some(existing) = self.genres.find_by_name(&name).await? {
            if Some(existing.id) != current {
                return Err(DomainError::Conflict("Genre already exists".to_string()));
            }
        }
        Ok(name)
    }

    async fn find(&self, genre_id: Uuid) -> DomainResult<Genre> {
        self.genres
            .find_by_id(genre_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Genre not found".to_string()))
    }
}
