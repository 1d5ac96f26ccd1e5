// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{like_expr, like_pattern};
use crate::domain::models::coupon::Coupon;
use crate::domain::repositories::coupon_repository::CouponRepository;
use crate::infrastructure::database::entities::{coupon, coupon_usage};
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 优惠券仓库实现
///
/// 使用者集合保存在 coupon_usages 表中
#[derive(Clone)]
pub struct CouponRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CouponRepositoryImpl {
    /// 创建新的优惠券仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn hydrate<C: ConnectionTrait>(
        conn: &C,
        models: Vec<coupon::Model>,
    ) -> Result<Vec<Coupon>, RepositoryError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let rows = coupon_usage::Entity::find()
            .filter(coupon_usage::Column::CouponId.is_in(models.iter().map(|m| m.id)))
            .order_by_asc(coupon_usage::Column::UsedAt)
            .all(conn)
            .await?;
        let mut users: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in rows {
            users.entry(row.coupon_id).or_default().push(row.user_id);
        }

        let now = Utc::now();
        Ok(models
            .into_iter()
            .map(|model| {
                let used_by = users.remove(&model.id).unwrap_or_default();
                let mut coupon = into_domain(model, used_by);
                coupon.refresh_status(now);
                coupon
            })
            .collect())
    }

    async fn find_one<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> Result<Option<Coupon>, RepositoryError> {
        match coupon::Entity::find_by_id(id).one(conn).await? {
            Some(model) => Ok(Self::hydrate(conn, vec![model]).await?.into_iter().next()),
            None => Ok(None),
        }
    }
}

fn into_domain(model: coupon::Model, users: Vec<Uuid>) -> Coupon {
    Coupon {
        id: model.id,
        code: model.code,
        discount: model.discount,
        expires: model.expires,
        max_uses: model.max_uses,
        uses: model.uses,
        users,
        status: model.status.parse().unwrap_or_default(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn to_active_model(coupon: &Coupon) -> coupon::ActiveModel {
    coupon::ActiveModel {
        id: Set(coupon.id),
        code: Set(coupon.code.clone()),
        discount: Set(coupon.discount),
        expires: Set(coupon.expires),
        max_uses: Set(coupon.max_uses),
        uses: Set(coupon.uses),
        status: Set(coupon.status.to_string()),
        created_at: Set(coupon.created_at),
        updated_at: Set(coupon.updated_at),
    }
}

#[async_trait]
impl CouponRepository for CouponRepositoryImpl {
    async fn create(&self, coupon: &Coupon) -> Result<Coupon, RepositoryError> {
        let mut coupon = coupon.clone();
        coupon.refresh_status(Utc::now());
        let model = to_active_model(&coupon).insert(self.db.as_ref()).await?;
        Ok(into_domain(model, Vec::new()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Coupon>, RepositoryError> {
        Self::find_one(self.db.as_ref(), id).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, RepositoryError> {
        let model = coupon::Entity::find()
            .filter(coupon::Column::Code.eq(code))
            .one(self.db.as_ref())
            .await?;
        match model {
            Some(model) => Ok(Self::hydrate(self.db.as_ref(), vec![model])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    async fn list(&self, query: &PageQuery) -> Result<(Vec<Coupon>, u64), RepositoryError> {
        let mut select = coupon::Entity::find();
        if let Some(term) = query.search_term() {
            // 券码统一为大写存储
            let pattern = like_pattern(term).to_uppercase();
            select = select.filter(coupon::Column::Code.like(like_expr(pattern)));
        }

        let total = select.clone().count(self.db.as_ref()).await?;
        let models = select
            .order_by_desc(coupon::Column::CreatedAt)
            .offset(query.offset())
            .limit(query.limit())
            .all(self.db.as_ref())
            .await?;

        Ok((Self::hydrate(self.db.as_ref(), models).await?, total))
    }

    async fn update(&self, coupon: &Coupon) -> Result<Coupon, RepositoryError> {
        if coupon::Entity::find_by_id(coupon.id)
            .one(self.db.as_ref())
            .await?
            .is_none()
        {
            return Err(RepositoryError::NotFound);
        }

        let mut coupon = coupon.clone();
        coupon.refresh_status(Utc::now());
        let mut active = to_active_model(&coupon);
        active.updated_at = Set(Utc::now().fixed_offset());
        let model = active.update(self.db.as_ref()).await?;
        Ok(into_domain(model, coupon.users))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;
        coupon_usage::Entity::delete_many()
            .filter(coupon_usage::Column::CouponId.eq(id))
            .exec(&txn)
            .await?;
        let result = coupon::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(RepositoryError::NotFound);
        }
        txn.commit().await?;
        Ok(())
    }

    async fn record_usage(
        &self,
        coupon_id: Uuid,
        user_id: Uuid,
    ) -> Result<Coupon, RepositoryError> {
        let txn = self.db.begin().await?;

        let inserted = coupon_usage::Entity::insert(coupon_usage::ActiveModel {
            coupon_id: Set(coupon_id),
            user_id: Set(user_id),
            used_at: Set(Utc::now().fixed_offset()),
        })
        .on_conflict(
            OnConflict::columns([coupon_usage::Column::CouponId, coupon_usage::Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        if inserted > 0 {
            coupon::Entity::update_many()
                .col_expr(
                    coupon::Column::Uses,
                    Expr::col((coupon::Entity, coupon::Column::Uses)).add(1),
                )
                .col_expr(
                    coupon::Column::UpdatedAt,
                    Expr::value(Utc::now().fixed_offset()),
                )
                .filter(coupon::Column::Id.eq(coupon_id))
                .exec(&txn)
                .await?;
        }

        let coupon = Self::find_one(&txn, coupon_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        // 派生状态落库，便于按状态筛选
        coupon::Entity::update_many()
            .col_expr(coupon::Column::Status, Expr::value(coupon.status.to_string()))
            .filter(coupon::Column::Id.eq(coupon_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(coupon)
    }
}
