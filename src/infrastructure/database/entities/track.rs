// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tracks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub artist_id: Uuid,
    /// JSON 数组形式的流派名称
    #[sea_orm(column_type = "Text")]
    pub genres: String,
    pub album_id: Option<Uuid>,
    pub file_url: String,
    pub image_url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::track_listener::Entity")]
    Listeners,
    #[sea_orm(has_many = "super::track_play_history::Entity")]
    PlayHistory,
}

impl Related<super::track_listener::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listeners.def()
    }
}

impl Related<super::track_play_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
