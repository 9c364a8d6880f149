/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::extract::Multipart;
use scholar_core::storage::UploadedFile;
use scholar_core::types::Session;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{WebError, WebResult};

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub matricule: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: Session,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterStartRequest {
    pub name: String,
    pub matricule: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterVerifyRequest {
    pub matricule: String,
    pub otp: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct DecisionRequest {
    pub comment: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub year: Option<i32>,
    pub supervisor: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CountResponse {
    pub count: u64,
}

/// Text fields and files of a `multipart/form-data` body, keyed by field name.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> WebResult<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_some() {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;

                // Browsers send an empty part for a file input left blank.
                if !data.is_empty() {
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            data,
                        },
                    );
                }
            } else {
                form.fields.insert(name, field.text().await?);
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> WebResult<String> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| WebError::missing_field(name))
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    pub fn require_file(&mut self, name: &str) -> WebResult<UploadedFile> {
        self.take_file(name)
            .ok_or_else(|| WebError::BadRequest("A PDF file is required".to_string()))
    }
}
