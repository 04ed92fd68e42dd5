//! Document store endpoints: list, view, create, upload, update, delete.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use super::{check_status, endpoint};
use crate::error::{ApiResult, ValidationError};
use crate::models::{normalize_category, DocumentDetail, DocumentSummary, IngestRequest, IngestResponse};
use crate::traits::{json_headers, Headers, HttpClient, MultipartForm};

/// A file upload for `POST /api/documents/upload`.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub title: String,
    pub category: Option<String>,
    pub file_name: String,
    pub data: Bytes,
}

impl UploadRequest {
    /// Build from raw input: title trimmed, blank category dropped.
    pub fn new(
        title: &str,
        category: Option<&str>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            category: normalize_category(category),
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Read `path` and build an upload named after the file.
    ///
    /// A missing title is reported before the file is touched.
    pub async fn from_path(path: &Path, title: &str, category: Option<&str>) -> ApiResult<Self> {
        if title.trim().is_empty() {
            return Err(ValidationError::MissingTitle.into());
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(ValidationError::MissingFile)?;
        let data = tokio::fs::read(path).await?;
        Ok(Self::new(title, category, file_name, data))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.file_name.is_empty() {
            return Err(ValidationError::MissingFile);
        }
        Ok(())
    }

    fn into_form(self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .file("file", self.file_name, self.data)
            .text("title", self.title);
        if let Some(category) = self.category {
            form = form.text("category", category);
        }
        form
    }
}

fn validate_ingest(request: &IngestRequest) -> Result<(), ValidationError> {
    if request.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if request.content.trim().is_empty() {
        return Err(ValidationError::MissingContent);
    }
    Ok(())
}

/// Client for `/api/documents`.
pub struct DocumentApi<C: HttpClient> {
    /// Base URL for the chat server
    pub base_url: String,
    client: Arc<C>,
}

impl<C: HttpClient> Clone for DocumentApi<C> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> DocumentApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self::with_shared_client(base_url, Arc::new(client))
    }

    /// Build on an HTTP client shared with other API clients.
    pub fn with_shared_client(base_url: impl Into<String>, client: Arc<C>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn document_url(&self, id: Uuid) -> String {
        endpoint(&self.base_url, &format!("/api/documents/{}", id))
    }

    /// List every document.
    pub async fn list(&self) -> ApiResult<Vec<DocumentSummary>> {
        let url = endpoint(&self.base_url, "/api/documents");
        let response = self.client.get(&url, &Headers::new()).await?;
        check_status(&response)?;
        Ok(response.json()?)
    }

    /// Fetch one document. `None` if the server has no such id.
    pub async fn get(&self, id: Uuid) -> ApiResult<Option<DocumentDetail>> {
        let response = self.client.get(&self.document_url(id), &Headers::new()).await?;
        if response.status == 404 {
            return Ok(None);
        }
        check_status(&response)?;
        Ok(Some(response.json()?))
    }

    /// Ingest a text document.
    pub async fn create(&self, request: &IngestRequest) -> ApiResult<IngestResponse> {
        validate_ingest(request)?;

        let url = endpoint(&self.base_url, "/api/documents");
        let body = serde_json::to_string(request)?;
        let response = self.client.post(&url, &body, &json_headers()).await?;
        check_status(&response)?;

        let created: IngestResponse = response.json()?;
        info!("ingested document {} ({})", created.document_id, request.title);
        Ok(created)
    }

    /// Upload a file as a new document.
    pub async fn upload(&self, request: UploadRequest) -> ApiResult<IngestResponse> {
        request.validate()?;

        let url = endpoint(&self.base_url, "/api/documents/upload");
        debug!("uploading {} ({} bytes)", request.file_name, request.data.len());
        let response = self
            .client
            .post_multipart(&url, request.into_form(), &Headers::new())
            .await?;
        check_status(&response)?;

        let created: IngestResponse = response.json()?;
        info!("uploaded document {}", created.document_id);
        Ok(created)
    }

    /// Replace a document's title, content and category.
    ///
    /// `None` if the server has no such id.
    pub async fn update(&self, id: Uuid, request: &IngestRequest) -> ApiResult<Option<IngestResponse>> {
        validate_ingest(request)?;

        let body = serde_json::to_string(request)?;
        let response = self
            .client
            .put(&self.document_url(id), &body, &json_headers())
            .await?;
        if response.status == 404 {
            return Ok(None);
        }
        check_status(&response)?;
        Ok(Some(response.json()?))
    }

    /// Delete a document. `false` if the server has no such id.
    pub async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        let response = self
            .client
            .delete(&self.document_url(id), &Headers::new())
            .await?;
        if response.status == 404 {
            return Ok(false);
        }
        check_status(&response)?;
        Ok(true)
    }
}
