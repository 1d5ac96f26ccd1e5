// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func, OnConflict},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{decode_json_list, encode_json_list, escape_like, like_expr, like_pattern};
use crate::domain::models::track::{
    BillingPeriod, NewTrack, PlayHistoryEntry, Track, TrackChanges, TrackFilter,
};
use crate::domain::repositories::track_repository::TrackRepository;
use crate::infrastructure::database::entities::{
    track, track_listener, track_play_history, user_liked_song,
};
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 歌曲仓库实现
///
/// 监听者和按月播放计数分别存储在关联表中，读取时批量装配
#[derive(Clone)]
pub struct TrackRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TrackRepositoryImpl {
    /// 创建新的歌曲仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn hydrate(&self, models: Vec<track::Model>) -> Result<Vec<Track>, RepositoryError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

        let listener_rows = track_listener::Entity::find()
            .filter(track_listener::Column::TrackId.is_in(ids.clone()))
            .order_by_asc(track_listener::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        let mut listeners: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in listener_rows {
            listeners.entry(row.track_id).or_default().push(row.user_id);
        }

        let history_rows = track_play_history::Entity::find()
            .filter(track_play_history::Column::TrackId.is_in(ids))
            .order_by_asc(track_play_history::Column::Year)
            .order_by_asc(track_play_history::Column::Month)
            .all(self.db.as_ref())
            .await?;
        let mut history: HashMap<Uuid, Vec<PlayHistoryEntry>> = HashMap::new();
        for row in history_rows {
            let month = u32::try_from(row.month).map_err(|_| {
                RepositoryError::Serialization(format!("invalid month {}", row.month))
            })?;
            history.entry(row.track_id).or_default().push(PlayHistoryEntry {
                year: row.year,
                month,
                plays: row.plays,
            });
        }

        models
            .into_iter()
            .map(|model| {
                let track_listeners = listeners.remove(&model.id).unwrap_or_default();
                let play_history = history.remove(&model.id).unwrap_or_default();
                into_domain(model, track_listeners, play_history)
            })
            .collect()
    }
}

fn into_domain(
    model: track::Model,
    listeners: Vec<Uuid>,
    play_history: Vec<PlayHistoryEntry>,
) -> Result<Track, RepositoryError> {
    Ok(Track {
        id: model.id,
        title: model.title,
        artist_id: model.artist_id,
        genres: decode_json_list(&model.genres)?,
        album_id: model.album_id,
        file_url: model.file_url,
        image_url: model.image_url,
        duration_seconds: model.duration_seconds,
        listeners,
        play_history,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

#[async_trait]
impl TrackRepository for TrackRepositoryImpl {
    async fn create(&self, new_track: NewTrack) -> Result<Track, RepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = track::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_track.title),
            artist_id: Set(new_track.artist_id),
            genres: Set(encode_json_list(&new_track.genres)?),
            album_id: Set(new_track.album_id),
            file_url: Set(new_track.file_url),
            image_url: Set(new_track.image_url),
            duration_seconds: Set(new_track.duration_seconds),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db.as_ref())
        .await?;

        into_domain(model, Vec::new(), Vec::new())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Track>, RepositoryError> {
        let model = track::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        match model {
            Some(model) => Ok(self.hydrate(vec![model]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Track>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = track::Entity::find()
            .filter(track::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await?;
        let mut by_id: HashMap<Uuid, Track> = self
            .hydrate(models)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn list(
        &self,
        filter: &TrackFilter,
        query: &PageQuery,
    ) -> Result<(Vec<Track>, u64), RepositoryError> {
        let mut select = track::Entity::find();

        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| query.search_term());
        if let Some(term) = search {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(track::Column::Title)))
                    .like(like_expr(like_pattern(term))),
            );
        }

        // 流派以 JSON 数组存储，按带引号的完整名称匹配
        if let Some(genre) = filter.genre.as_deref() {
            let pattern = format!("%\"{}\"%", escape_like(genre));
            select = select.filter(track::Column::Genres.like(like_expr(pattern)));
        }

        if let Some(artist_id) = filter.artist_id {
            select = select.filter(track::Column::ArtistId.eq(artist_id));
        }

        if let Some(ids) = &filter.ids {
            select = select.filter(track::Column::Id.is_in(ids.clone()));
        }

        let total = select.clone().count(self.db.as_ref()).await?;
        let models = select
            .order_by_desc(track::Column::CreatedAt)
            .offset(query.offset())
            .limit(query.limit())
            .all(self.db.as_ref())
            .await?;

        Ok((self.hydrate(models).await?, total))
    }

    async fn find_by_artist(&self, artist_id: Uuid) -> Result<Vec<Track>, RepositoryError> {
        let models = track::Entity::find()
            .filter(track::Column::ArtistId.eq(artist_id))
            .order_by_desc(track::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        self.hydrate(models).await
    }

    async fn update(&self, id: Uuid, changes: TrackChanges) -> Result<Track, RepositoryError> {
        let model = track::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active = model.into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(genres) = changes.genres {
            active.genres = Set(encode_json_list(&genres)?);
        }
        if let Some(album_id) = changes.album_id {
            active.album_id = Set(album_id);
        }
        if let Some(file_url) = changes.file_url {
            active.file_url = Set(file_url);
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = Set(Some(image_url));
        }
        active.updated_at = Set(Utc::now().fixed_offset());

        let model = active.update(self.db.as_ref()).await?;
        self.hydrate(vec![model])
            .await?
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        track_listener::Entity::delete_many()
            .filter(track_listener::Column::TrackId.eq(id))
            .exec(&txn)
            .await?;
        track_play_history::Entity::delete_many()
            .filter(track_play_history::Column::TrackId.eq(id))
            .exec(&txn)
            .await?;
        user_liked_song::Entity::delete_many()
            .filter(user_liked_song::Column::TrackId.eq(id))
            .exec(&txn)
            .await?;
        let result = track::Entity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }

    async fn record_play(
        &self,
        track_id: Uuid,
        user_id: Uuid,
        period: BillingPeriod,
    ) -> Result<(), RepositoryError> {
        let month = i32::try_from(period.month)
            .map_err(|_| RepositoryError::Serialization(format!("invalid month {}", period.month)))?;
        let txn = self.db.begin().await?;

        if track::Entity::find_by_id(track_id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        // 监听者按集合语义写入
        track_listener::Entity::insert(track_listener::ActiveModel {
            track_id: Set(track_id),
            user_id: Set(user_id),
            created_at: Set(Utc::now().fixed_offset()),
        })
        .on_conflict(
            OnConflict::columns([
                track_listener::Column::TrackId,
                track_listener::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        track_play_history::Entity::insert(track_play_history::ActiveModel {
            track_id: Set(track_id),
            year: Set(period.year),
            month: Set(month),
            plays: Set(1),
        })
        .on_conflict(
            OnConflict::columns([
                track_play_history::Column::TrackId,
                track_play_history::Column::Year,
                track_play_history::Column::Month,
            ])
            .value(
                track_play_history::Column::Plays,
                Expr::col((
                    track_play_history::Entity,
                    track_play_history::Column::Plays,
                ))
                .add(1),
            )
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    async fn clear_album(&self, album_id: Uuid) -> Result<u64, RepositoryError> {
        let result = track::Entity::update_many()
            .col_expr(track::Column::AlbumId, Expr::value(Option::<Uuid>::None))
            .col_expr(
                track::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(track::Column::AlbumId.eq(album_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(track::Entity::find().count(self.db.as_ref()).await?)
    }

    async fn total_plays_in(&self, period: BillingPeriod) -> Result<i64, RepositoryError> {
        let rows = track_play_history::Entity::find()
            .filter(track_play_history::Column::Year.eq(period.year))
            .filter(track_play_history::Column::Month.eq(period.month as i32))
            .all(self.db.as_ref())
            .await?;
        Ok(rows.iter().map(|row| row.plays).sum())
    }
}
