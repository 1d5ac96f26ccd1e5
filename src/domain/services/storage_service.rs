// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::utils::errors::DomainResult;

/// 上传的文件
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field_name: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// 文件扩展名（小写，不含点）
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 资源存储特质
#[async_trait]
pub trait StorageService: Send + Sync {
    /// 上传文件到指定目录，返回可公开访问的地址
    async fn upload(&self, folder: &str, file: UploadedFile) -> DomainResult<String>;
}
