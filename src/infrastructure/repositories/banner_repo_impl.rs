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
use crate::domain::models::banner::Banner;
use crate::domain::repositories::banner_repository::BannerRepository;
use crate::infrastructure::database::entities::banner;
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 横幅仓库实现
#[derive(Clone)]
pub struct BannerRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl BannerRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<banner::Model> for Banner {
    fn from(model: banner::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            image_url: model.image_url,
            action: model.action,
            is_active: model.is_active,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn to_active_model(banner: &Banner) -> banner::ActiveModel {
    banner::ActiveModel {
        id: Set(banner.id),
        title: Set(banner.title.clone()),
        description: Set(banner.description.clone()),
        image_url: Set(banner.image_url.clone()),
        action: Set(banner.action.clone()),
        is_active: Set(banner.is_active),
        created_by: Set(banner.created_by),
        created_at: Set(banner.created_at),
        updated_at: Set(banner.updated_at),
    }
}

#[async_trait]
impl BannerRepository for BannerRepositoryImpl {
    async fn create(&self, banner: &Banner) -> Result<Banner, RepositoryError> {
        let model = to_active_model(banner).insert(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Banner>, RepositoryError> {
        let model = banner::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, query: &PageQuery) -> Result<(Vec<Banner>, u64), RepositoryError> {
        let mut select = banner::Entity::find();
        if let Some(term) = query.search_term() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(banner::Column::Title)))
                    .like(like_expr(like_pattern(term))),
            );
        }

        let total = select.clone().count(self.db.as_ref()).await?;
        let models = select
            .order_by_desc(banner::Column::CreatedAt)
            .offset(query.offset())
            .limit(query.limit())
            .all(self.db.as_ref())
            .await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn list_active(&self) -> Result<Vec<Banner>, RepositoryError> {
        let models = banner::Entity::find()
            .filter(banner::Column::IsActive.eq(true))
            .order_by_desc(banner::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, banner: &Banner) -> Result<Banner, RepositoryError> {
        if banner::Entity::find_by_id(banner.id)
            .one(self.db.as_ref())
            .await?
            .is_none()
        {
            return Err(RepositoryError::NotFound);
        }

        let mut active = to_active_model(banner);
        active.updated_at = Set(Utc::now().fixed_offset());
        Ok(active.update(self.db.as_ref()).await?.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = banner::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
