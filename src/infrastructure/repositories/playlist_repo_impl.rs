// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::{decode_json_list, encode_json_list};
use crate::domain::models::playlist::Playlist;
use crate::domain::repositories::playlist_repository::PlaylistRepository;
use crate::infrastructure::database::entities::playlist;
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 播放列表仓库实现
#[derive(Clone)]
pub struct PlaylistRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl PlaylistRepositoryImpl {
    /// 创建新的播放列表仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<playlist::Model> for Playlist {
    type Error = RepositoryError;

    fn try_from(model: playlist::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            description: model.description,
            user_id: model.user_id,
            image_url: model.image_url,
            tracks: decode_json_list(&model.track_ids)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

fn to_active_model(playlist: &Playlist) -> Result<playlist::ActiveModel, RepositoryError> {
    Ok(playlist::ActiveModel {
        id: Set(playlist.id),
        name: Set(playlist.name.clone()),
        description: Set(playlist.description.clone()),
        user_id: Set(playlist.user_id),
        image_url: Set(playlist.image_url.clone()),
        track_ids: Set(encode_json_list(&playlist.tracks)?),
        created_at: Set(playlist.created_at),
        updated_at: Set(playlist.updated_at),
    })
}

#[async_trait]
impl PlaylistRepository for PlaylistRepositoryImpl {
    async fn create(&self, playlist: &Playlist) -> Result<Playlist, RepositoryError> {
        to_active_model(playlist)?
            .insert(self.db.as_ref())
            .await?
            .try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>, RepositoryError> {
        playlist::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(Playlist::try_from)
            .transpose()
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        query: &PageQuery,
    ) -> Result<(Vec<Playlist>, u64), RepositoryError> {
        let select = playlist::Entity::find().filter(playlist::Column::UserId.eq(user_id));

        let total = select.clone().count(self.db.as_ref()).await?;
        let playlists = select
            .order_by_desc(playlist::Column::UpdatedAt)
            .offset(query.offset())
            .limit(query.limit())
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Playlist::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((playlists, total))
    }

    async fn update(&self, playlist: &Playlist) -> Result<Playlist, RepositoryError> {
        if playlist::Entity::find_by_id(playlist.id)
            .one(self.db.as_ref())
            .await?
            .is_none()
        {
            return Err(RepositoryError::NotFound);
        }

        let mut active = to_active_model(playlist)?;
        active.updated_at = Set(Utc::now().fixed_offset());
        active.update(self.db.as_ref()).await?.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = playlist::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
