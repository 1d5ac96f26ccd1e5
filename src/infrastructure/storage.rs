// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::settings::StorageSettings;
use crate::domain::services::storage_service::{StorageService, UploadedFile};
use crate::utils::errors::{DomainError, DomainResult};

/// Cloudinary 签名上传实现
pub struct CloudinaryStorage {
    client: reqwest::Client,
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorBody {
    error: CloudinaryErrorDetail,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorDetail {
    message: String,
}

impl CloudinaryStorage {
    pub fn new(api_base: String, cloud_name: String, api_key: String, api_secret: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            cloud_name,
            api_key,
            api_secret,
        }
    }

    /// 签名参数按字母序拼接后追加密钥，再做 SHA-256
    pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
        let mut sorted = params.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let joined = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl StorageService for CloudinaryStorage {
    async fn upload(&self, folder: &str, file: UploadedFile) -> DomainResult<String> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = Self::sign(
            &[("folder", folder), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );

        let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.filename);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| DomainError::Validation(format!("Invalid content type: {}", e)))?;
        }
        let form = reqwest::multipart::Form::new()
            .text("folder", folder.to_string())
            .text("timestamp", timestamp)
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .part("file", part);

        let url = format!("{}/v1_1/{}/auto/upload", self.api_base, self.cloud_name);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::External(format!("Upload failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::External(format!("Upload failed: {}", e)))?;
        if !status.is_success() {
            let message = serde_json::from_str::<CloudinaryErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("status {}", status));
            return Err(DomainError::External(format!("Upload failed: {}", message)));
        }

        let uploaded: CloudinaryUploadResponse = serde_json::from_str(&body)
            .map_err(|e| DomainError::External(format!("Unexpected upload response: {}", e)))?;
        Ok(uploaded.secure_url)
    }
}

/// 本地文件系统存储实现
pub struct LocalStorage {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>, public_base_url: String) -> Self {
        Self {
            base_path: base_path.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn object_key(folder: &str, file: &UploadedFile) -> String {
        let name = match file.extension() {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        format!("{}/{}", folder.trim_matches('/'), name)
    }
}

#[async_trait]
impl StorageService for LocalStorage {
    async fn upload(&self, folder: &str, file: UploadedFile) -> DomainResult<String> {
        let key = Self::object_key(folder, &file);
        let full_path = self.base_path.join(&key);

        // 确保目录存在
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Internal(format!("Failed to create directory: {}", e)))?;
        }

        let mut handle = fs::File::create(&full_path)
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to create file: {}", e)))?;
        handle
            .write_all(&file.bytes)
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to write file: {}", e)))?;
        handle
            .flush()
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to write file: {}", e)))?;

        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

/// 测试用的内存存储实现
#[derive(Default)]
pub struct InMemoryStorage {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, url: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(url).cloned()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl StorageService for InMemoryStorage {
    async fn upload(&self, folder: &str, file: UploadedFile) -> DomainResult<String> {
        let url = format!("memory://{}", LocalStorage::object_key(folder, &file));
        self.objects.write().await.insert(url.clone(), file.bytes);
        Ok(url)
    }
}

/// 存储工厂函数
pub fn create_storage_service(settings: &StorageSettings) -> DomainResult<Arc<dyn StorageService>> {
    match settings.storage_type.as_str() {
        "local" => {
            let base_path = settings
                .local_path
                .clone()
                .unwrap_or_else(|| "./storage".to_string());
            let public_base_url = settings
                .public_base_url
                .clone()
                .unwrap_or_else(|| "/uploads".to_string());
            Ok(Arc::new(LocalStorage::new(base_path, public_base_url)))
        }
        "cloudinary" => {
            let required = |value: &Option<String>, name: &str| {
                value
                    .clone()
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| DomainError::Internal(format!("storage.{} is required", name)))
            };
            Ok(Arc::new(CloudinaryStorage::new(
                settings
                    .cloudinary_api_base
                    .clone()
                    .unwrap_or_else(|| "https://api.cloudinary.com".to_string()),
                required(&settings.cloudinary_cloud_name, "cloudinary_cloud_name")?,
                required(&settings.cloudinary_api_key, "cloudinary_api_key")?,
                required(&settings.cloudinary_api_secret, "cloudinary_api_secret")?,
            )))
        }
        other => Err(DomainError::Internal(format!(
            "Unsupported storage type: {}",
            other
        ))),
    }
}
