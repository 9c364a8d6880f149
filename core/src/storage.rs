/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use super::consts::{PDF_CONTENT_TYPE, PDF_MAGIC};
use super::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Stores the bytes and returns the reference kept on the project.
    async fn upload(&self, data: Bytes, folder: &str, extension: &str) -> Result<String>;

    async fn remove(&self, reference: &str) -> Result<()>;

    fn public_url(&self, reference: &str) -> String;
}

/// Keeps files under `<base_path>/files`, which the web layer serves read-only at
/// `/files`. Public URLs are built from `files_url`, the origin that reaches that
/// route.
pub struct LocalFileStore {
    root: PathBuf,
    files_url: String,
}

impl LocalFileStore {
    pub async fn new(base_path: &str, files_url: &str) -> Result<Self> {
        let root = PathBuf::from(base_path).join("files");
        fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create storage directory {}", root.display()))?;

        Ok(Self {
            root,
            files_url: files_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload(&self, data: Bytes, folder: &str, extension: &str) -> Result<String> {
        let directory = self.root.join(folder);
        fs::create_dir_all(&directory)
            .await
            .context("Failed to create upload directory")?;

        let reference = format!("{}/{}.{}", folder, Uuid::new_v4(), extension);
        fs::write(self.root.join(&reference), &data)
            .await
            .context("Failed to write uploaded file")?;

        debug!(reference, size = data.len(), "Stored file");
        Ok(reference)
    }

    async fn remove(&self, reference: &str) -> Result<()> {
        fs::remove_file(self.root.join(reference))
            .await
            .with_context(|| format!("Failed to remove stored file {}", reference))?;

        debug!(reference, "Removed file");
        Ok(())
    }

    fn public_url(&self, reference: &str) -> String {
        format!("{}/files/{}", self.files_url, reference)
    }
}

/// Accepts a file only when it is declared as a PDF and starts with the PDF magic
/// bytes.
pub fn validate_pdf(file: &UploadedFile) -> ServiceResult<()> {
    if file.data.is_empty() {
        return Err(ServiceError::Validation("A PDF file is required".to_string()));
    }

    if file.content_type.as_deref() != Some(PDF_CONTENT_TYPE) || !file.data.starts_with(PDF_MAGIC)
    {
        return Err(ServiceError::Validation(
            "Only PDF files are allowed".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, data: &'static [u8]) -> UploadedFile {
        UploadedFile {
            file_name: Some("report.pdf".to_string()),
            content_type: Some(content_type.to_string()),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_validate_pdf() {
        assert!(validate_pdf(&file("application/pdf", b"%PDF-1.7\n...")).is_ok());
        assert!(validate_pdf(&file("application/pdf", b"PK\x03\x04")).is_err());
        assert!(validate_pdf(&file("text/plain", b"%PDF-1.7\n...")).is_err());
        assert!(validate_pdf(&file("application/pdf", b"")).is_err());
    }

    #[tokio::test]
    async fn test_local_store_writes_under_folder() {
        let base = std::env::temp_dir().join(format!("scholar-storage-{}", Uuid::new_v4()));
        let base = base.to_string_lossy().to_string();
        let store = LocalFileStore::new(&base, "http://localhost:3000/")
            .await
            .unwrap();

        let reference = store
            .upload(Bytes::from_static(b"%PDF-1.4"), "drafts", "pdf")
            .await
            .unwrap();

        assert!(reference.starts_with("drafts/"));
        assert!(reference.ends_with(".pdf"));
        assert_eq!(
            fs::read(store.root().join(&reference)).await.unwrap(),
            b"%PDF-1.4"
        );
        assert_eq!(
            store.public_url(&reference),
            format!("http://localhost:3000/files/{}", reference)
        );

        store.remove(&reference).await.unwrap();
        assert!(!store.root().join(&reference).exists());
        assert!(store.remove(&reference).await.is_err());

        fs::remove_dir_all(&base).await.unwrap();
    }
}
