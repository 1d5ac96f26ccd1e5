// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::{like_expr, like_pattern};
use crate::domain::models::genre::Genre;
use crate::domain::repositories::genre_repository::GenreRepository;
use crate::infrastructure::database::entities::genre;
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 流派仓库实现
#[derive(Clone)]
pub struct GenreRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl GenreRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<genre::Model> for Genre {
    fn from(model: genre::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            is_blocked: model.is_blocked,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn to_active_model(genre: &Genre) -> genre::ActiveModel {
    genre::ActiveModel {
        id: Set(genre.id),
        name: Set(genre.name.clone()),
        is_blocked: Set(genre.is_blocked),
        created_at: Set(genre.created_at),
        updated_at: Set(genre.updated_at),
    }
}

#[async_trait]
impl GenreRepository for GenreRepositoryImpl {
    async fn create(&self, genre: &Genre) -> Result<Genre, RepositoryError> {
        let model = to_active_model(genre).insert(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Genre>, RepositoryError> {
        let model = genre::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, RepositoryError> {
        let model = genre::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(genre::Column::Name)))
                    .eq(name.trim().to_lowercase()),
            )
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, query: &PageQuery) -> Result<(Vec<Genre>, u64), RepositoryError> {
        let mut select = genre::Entity::find();
        if let Some(term) = query.search_term() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(genre::Column::Name)))
                    .like(like_expr(like_pattern(term))),
            );
        }

        let total = select.clone().count(self.db.as_ref()).await?;
        let models = select
            .order_by_asc(genre::Column::Name)
            .offset(query.offset())
            .limit(query.limit())
            .all(self.db.as_ref())
            .await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn list_active(&self) -> Result<Vec<Genre>, RepositoryError> {
        let models = genre::Entity::find()
            .filter(genre::Column::IsBlocked.eq(false))
            .order_by_asc(genre::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, genre: &Genre) -> Result<Genre, RepositoryError> {
        if genre::Entity::find_by_id(genre.id)
            .one(self.db.as_ref())
            .await?
            .is_none()
        {
            return Err(RepositoryError::NotFound);
        }

        let mut active = to_active_model(genre);
        active.updated_at = Set(Utc::now().fixed_offset());
        Ok(active.update(self.db.as_ref()).await?.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = genre::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
