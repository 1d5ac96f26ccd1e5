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
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::{like_expr, like_pattern};
use crate::domain::models::user::{User, UserRole};
use crate::domain::repositories::user_repository::UserRepository;
use crate::infrastructure::database::entities::{user, user_liked_song};
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 用户仓库实现
///
/// 基于SeaORM实现的用户数据访问层，喜欢的歌曲存储在关联表中
#[derive(Clone)]
pub struct UserRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    /// 创建新的用户仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 批量加载喜欢的歌曲，按喜欢时间倒序
    async fn load_likes(
        &self,
        user_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, RepositoryError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = user_liked_song::Entity::find()
            .filter(user_liked_song::Column::UserId.is_in(user_ids))
            .order_by_desc(user_liked_song::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        let mut likes: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in rows {
            likes.entry(row.user_id).or_default().push(row.track_id);
        }
        Ok(likes)
    }

    async fn hydrate(&self, models: Vec<user::Model>) -> Result<Vec<User>, RepositoryError> {
        let mut likes = self
            .load_likes(models.iter().map(|m| m.id).collect())
            .await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let liked = likes.remove(&model.id).unwrap_or_default();
                into_domain(model, liked)
            })
            .collect())
    }

    async fn hydrate_one(&self, model: Option<user::Model>) -> Result<Option<User>, RepositoryError> {
        match model {
            Some(model) => Ok(self.hydrate(vec![model]).await?.into_iter().next()),
            None => Ok(None),
        }
    }
}

fn into_domain(model: user::Model, liked_songs: Vec<Uuid>) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role: model.role.parse().unwrap_or_default(),
        is_active: model.is_active,
        premium: model.premium,
        premium_expires_at: model.premium_expires_at,
        liked_songs,
        stripe_customer_id: model.stripe_customer_id,
        stripe_payment_method_id: model.stripe_payment_method_id,
        stripe_subscription_id: model.stripe_subscription_id,
        google_id: model.google_id,
        profile_image: model.profile_image,
        bio: model.bio,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn to_active_model(user: &User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(user.id),
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        password_hash: Set(user.password_hash.clone()),
        role: Set(user.role.to_string()),
        is_active: Set(user.is_active),
        premium: Set(user.premium.clone()),
        premium_expires_at: Set(user.premium_expires_at),
        stripe_customer_id: Set(user.stripe_customer_id.clone()),
        stripe_payment_method_id: Set(user.stripe_payment_method_id.clone()),
        stripe_subscription_id: Set(user.stripe_subscription_id.clone()),
        google_id: Set(user.google_id.clone()),
        profile_image: Set(user.profile_image.clone()),
        bio: Set(user.bio.clone()),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let model = to_active_model(user).insert(self.db.as_ref()).await?;
        Ok(into_domain(model, Vec::new()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        self.hydrate_one(model).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?;
        self.hydrate_one(model).await
    }

    async fn find_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find()
            .filter(user::Column::StripeSubscriptionId.eq(subscription_id))
            .one(self.db.as_ref())
            .await?;
        self.hydrate_one(model).await
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        if user::Entity::find_by_id(user.id)
            .one(self.db.as_ref())
            .await?
            .is_none()
        {
            return Err(RepositoryError::NotFound);
        }

        let mut active = to_active_model(user);
        active.updated_at = Set(Utc::now().fixed_offset());
        let model = active.update(self.db.as_ref()).await?;
        Ok(into_domain(model, user.liked_songs.clone()))
    }

    async fn list_by_role(
        &self,
        role: UserRole,
        query: &PageQuery,
    ) -> Result<(Vec<User>, u64), RepositoryError> {
        let mut select = user::Entity::find().filter(user::Column::Role.eq(role.to_string()));

        if let Some(term) = query.search_term() {
            let pattern = like_pattern(term);
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(user::Column::Name)))
                            .like(like_expr(pattern.clone())),
                    )
                    .add(user::Column::Email.like(like_expr(pattern))),
            );
        }

        let total = select.clone().count(self.db.as_ref()).await?;
        let models = select
            .order_by_desc(user::Column::CreatedAt)
            .offset(query.offset())
            .limit(query.limit())
            .all(self.db.as_ref())
            .await?;

        Ok((self.hydrate(models).await?, total))
    }

    async fn count_by_role(&self, role: UserRole) -> Result<u64, RepositoryError> {
        let count = user::Entity::find()
            .filter(user::Column::Role.eq(role.to_string()))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn count_premium(&self) -> Result<u64, RepositoryError> {
        let count = user::Entity::find()
            .filter(user::Column::Premium.is_not_null())
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn toggle_like(&self, user_id: Uuid, track_id: Uuid) -> Result<bool, RepositoryError> {
        let existing = user_liked_song::Entity::find_by_id((user_id, track_id))
            .one(self.db.as_ref())
            .await?;

        if let Some(row) = existing {
            row.delete(self.db.as_ref()).await?;
            return Ok(false);
        }

        // 并发点赞时主键冲突直接忽略
        user_liked_song::Entity::insert(user_liked_song::ActiveModel {
            user_id: Set(user_id),
            track_id: Set(track_id),
            created_at: Set(Utc::now().fixed_offset()),
        })
        .on_conflict(
            OnConflict::columns([
                user_liked_song::Column::UserId,
                user_liked_song::Column::TrackId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(self.db.as_ref())
        .await?;

        Ok(true)
    }

    async fn liked_track_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepositoryError> {
        let mut likes = self.load_likes(vec![user_id]).await?;
        Ok(likes.remove(&user_id).unwrap_or_default())
    }
}
