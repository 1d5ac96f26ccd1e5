// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::extract::{FromRequest, Multipart, Request};
use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::services::storage_service::UploadedFile;
use crate::presentation::errors::AppError;
use crate::utils::errors::{DomainError, DomainResult};

/// 已读入内存的 multipart 表单
///
/// 文本字段与文件字段分开存放，空文件视为未上传
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// 去除首尾空白后的文本字段，空串视为缺失
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// 字段是否出现过（包括空值）
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn required(&self, name: &str) -> DomainResult<String> {
        self.text(name)
            .ok_or_else(|| DomainError::Validation(format!("{} is required", name)))
    }

    /// 解析可选字段
    pub fn parse<T: FromStr>(&self, name: &str) -> DomainResult<Option<T>> {
        self.text(name)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|_| DomainError::Validation(format!("Invalid value for {}", name)))
            })
            .transpose()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| DomainError::Validation(e.body_text()))?;

        let mut form = MultipartForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| DomainError::Validation(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| DomainError::Validation(e.body_text()))?;
                    if bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name.clone(),
                        UploadedFile {
                            field_name: name,
                            filename,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| DomainError::Validation(e.body_text()))?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }
}
