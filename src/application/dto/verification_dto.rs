// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::user::User;
use crate::domain::models::verification::{VerificationRequest, VerificationStatus};
use crate::utils::pagination::PageQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    pub fn status(self) -> VerificationStatus {
        match self {
            ReviewDecision::Approve => VerificationStatus::Approved,
            ReviewDecision::Reject => VerificationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewVerificationRequest {
    pub decision: ReviewDecision,
    #[validate(length(max = 1000))]
    pub feedback: Option<String>,
}

/// 审核列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<VerificationStatus>,
}

impl VerificationQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
            search: None,
        }
    }
}

/// 艺术家查看自己的认证状态
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStatusDto {
    pub status: VerificationStatus,
    pub feedback: Option<String>,
    pub submitted_at: Option<DateTime<FixedOffset>>,
    pub reviewed_at: Option<DateTime<FixedOffset>>,
}

impl VerificationStatusDto {
    pub fn unsubmitted() -> Self {
        Self {
            status: VerificationStatus::Unsubmitted,
            feedback: None,
            submitted_at: None,
            reviewed_at: None,
        }
    }
}

impl From<VerificationRequest> for VerificationStatusDto {
    fn from(request: VerificationRequest) -> Self {
        Self {
            status: request.status,
            feedback: request.feedback,
            submitted_at: Some(request.submitted_at),
            reviewed_at: request.reviewed_at,
        }
    }
}

/// 管理员审核视图，附带艺术家基本信息
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDto {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub artist_name: Option<String>,
    pub artist_email: Option<String>,
    pub id_proof_url: String,
    pub status: VerificationStatus,
    pub feedback: Option<String>,
    pub submitted_at: DateTime<FixedOffset>,
    pub reviewed_at: Option<DateTime<FixedOffset>>,
}

impl VerificationDto {
    pub fn new(request: VerificationRequest, artist: Option<&User>) -> Self {
        Self {
            id: request.id,
            artist_id: request.artist_id,
            artist_name: artist.map(|a| a.name.clone()),
            artist_email: artist.map(|a| a.email.clone()),
            id_proof_url: request.id_proof_url,
            status: request.status,
            feedback: request.feedback,
            submitted_at: request.submitted_at,
            reviewed_at: request.reviewed_at,
        }
    }
}
