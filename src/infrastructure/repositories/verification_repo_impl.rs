// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::models::verification::{VerificationRequest, VerificationStatus};
use crate::domain::repositories::verification_repository::VerificationRepository;
use crate::infrastructure::database::entities::verification_request;
use crate::utils::errors::RepositoryError;
use crate::utils::pagination::PageQuery;

/// 艺术家认证申请仓库实现
#[derive(Clone)]
pub struct VerificationRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl VerificationRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<verification_request::Model> for VerificationRequest {
    fn from(model: verification_request::Model) -> Self {
        Self {
            id: model.id,
            artist_id: model.artist_id,
            id_proof_url: model.id_proof_url,
            status: model.status.parse().unwrap_or_default(),
            feedback: model.feedback,
            submitted_at: model.submitted_at,
            reviewed_at: model.reviewed_at,
        }
    }
}

#[async_trait]
impl VerificationRepository for VerificationRepositoryImpl {
    async fn upsert(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationRequest, RepositoryError> {
        // 每位艺术家仅保留一条申请，重复提交覆盖原记录
        verification_request::Entity::insert(verification_request::ActiveModel {
            id: Set(request.id),
            artist_id: Set(request.artist_id),
            id_proof_url: Set(request.id_proof_url.clone()),
            status: Set(request.status.to_string()),
            feedback: Set(request.feedback.clone()),
            submitted_at: Set(request.submitted_at),
            reviewed_at: Set(request.reviewed_at),
        })
        .on_conflict(
            OnConflict::column(verification_request::Column::ArtistId)
                .update_columns([
                    verification_request::Column::IdProofUrl,
                    verification_request::Column::Status,
                    verification_request::Column::Feedback,
                    verification_request::Column::SubmittedAt,
                    verification_request::Column::ReviewedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(self.db.as_ref())
        .await?;

        self.find_by_artist(request.artist_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRequest>, RepositoryError> {
        let model = verification_request::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_artist(
        &self,
        artist_id: Uuid,
    ) -> Result<Option<VerificationRequest>, RepositoryError> {
        let model = verification_request::Entity::find()
            .filter(verification_request::Column::ArtistId.eq(artist_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(
        &self,
        status: Option<VerificationStatus>,
        query: &PageQuery,
    ) -> Result<(Vec<VerificationRequest>, u64), RepositoryError> {
        let mut select = verification_request::Entity::find();
        if let Some(status) = status {
            select = select.filter(verification_request::Column::Status.eq(status.to_string()));
        }

        let total = select.clone().count(self.db.as_ref()).await?;
        let models = select
            .order_by_desc(verification_request::Column::SubmittedAt)
            .offset(query.offset())
            .limit(query.limit())
            .all(self.db.as_ref())
            .await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }
}
