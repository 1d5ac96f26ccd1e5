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

use super::{decode_json_list, encode_json_list, like_expr, like_pattern};
use crate::domain::models::album::Album;
use crate::domain::repositories::album_repository::AlbumRepository;
use crate::infrastructure::database::entities::album;
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 专辑仓库实现
#[derive(Clone)]
pub struct AlbumRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AlbumRepositoryImpl {
    /// 创建新的专辑仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<album::Model> for Album {
    type Error = RepositoryError;

    fn try_from(model: album::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            description: model.description,
            artist_id: model.artist_id,
            cover_image: model.cover_image,
            tracks: decode_json_list(&model.track_ids)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

fn to_active_model(album: &Album) -> Result<album::ActiveModel, RepositoryError> {
    Ok(album::ActiveModel {
        id: Set(album.id),
        name: Set(album.name.clone()),
        description: Set(album.description.clone()),
        artist_id: Set(album.artist_id),
        cover_image: Set(album.cover_image.clone()),
        track_ids: Set(encode_json_list(&album.tracks)?),
        created_at: Set(album.created_at),
        updated_at: Set(album.updated_at),
    })
}

#[async_trait]
impl AlbumRepository for AlbumRepositoryImpl {
    async fn create(&self, album: &Album) -> Result<Album, RepositoryError> {
        let model = to_active_model(album)?.insert(self.db.as_ref()).await?;
        model.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Album>, RepositoryError> {
        album::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(Album::try_from)
            .transpose()
    }

    async fn find_by_artist(&self, artist_id: Uuid) -> Result<Vec<Album>, RepositoryError> {
        album::Entity::find()
            .filter(album::Column::ArtistId.eq(artist_id))
            .order_by_desc(album::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Album::try_from)
            .collect()
    }

    async fn list(&self, query: &PageQuery) -> Result<(Vec<Album>, u64), RepositoryError> {
        let mut select = album::Entity::find();
        if let Some(term) = query.search_term() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(album::Column::Name)))
                    .like(like_expr(like_pattern(term))),
            );
        }

        let total = select.clone().count(self.db.as_ref()).await?;
        let albums = select
            .order_by_desc(album::Column::CreatedAt)
            .offset(query.offset())
            .limit(query.limit())
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Album::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((albums, total))
    }

    async fn update(&self, album: &Album) -> Result<Album, RepositoryError> {
        if album::Entity::find_by_id(album.id)
            .one(self.db.as_ref())
            .await?
            .is_none()
        {
            return Err(RepositoryError::NotFound);
        }

        let mut active = to_active_model(album)?;
        active.updated_at = Set(Utc::now().fixed_offset());
        active.update(self.db.as_ref()).await?.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = album::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
