// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 艺术家身份认证申请
///
/// 每位艺术家最多一条记录，被拒后可重新提交
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub id: Uuid,
    pub artist_id: Uuid,
    /// 身份证明文件地址
    pub id_proof_url: String,
    pub status: VerificationStatus,
    /// 审核意见
    pub feedback: Option<String>,
    pub submitted_at: DateTime<FixedOffset>,
    pub reviewed_at: Option<DateTime<FixedOffset>>,
}

impl VerificationRequest {
    pub fn new(artist_id: Uuid, id_proof_url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            artist_id,
            id_proof_url,
            status: VerificationStatus::Pending,
            feedback: None,
            submitted_at: Utc::now().fixed_offset(),
            reviewed_at: None,
        }
    }

    /// 只有被拒绝或未提交的申请允许重新提交
    pub fn can_resubmit(&self) -> bool {
        matches!(
            self.status,
            VerificationStatus::Rejected | VerificationStatus::Unsubmitted
        )
    }
}

/// 认证状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Unsubmitted,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VerificationStatus::Pending => write!(f, "pending"),
            VerificationStatus::Approved => write!(f, "approved"),
            VerificationStatus::Rejected => write!(f, "rejected"),
            VerificationStatus::Unsubmitted => write!(f, "unsubmitted"),
        }
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VerificationStatus::Pending),
            "approved" => Ok(VerificationStatus::Approved),
            "rejected" => Ok(VerificationStatus::Rejected),
            "unsubmitted" => Ok(VerificationStatus::Unsubmitted),
            _ => Err(format!("Invalid verification status: {}", s)),
        }
    }
}
