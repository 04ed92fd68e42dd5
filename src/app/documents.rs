//! Document store commands for the App.

use std::path::Path;

use tracing::warn;
use uuid::Uuid;

use super::App;
use crate::api::UploadRequest;
use crate::error::{ApiError, ApiResult, ValidationError};
use crate::models::{IngestRequest, IngestResponse};
use crate::traits::{ChatView, ConversationStore, HttpClient};

/// `/edit` path that keeps the stored content.
const KEEP_CONTENT: &str = "-";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl<C, S, V> App<C, S, V>
where
    C: HttpClient + 'static,
    S: ConversationStore,
    V: ChatView,
{
    /// Show a notice for a failed document operation.
    fn report(&mut self, what: &str, error: ApiError) {
        if !error.is_validation() {
            warn!("{} failed: {}", what, error);
        }
        self.view.show_notice(&error.user_message());
    }

    /// Parse a document id typed by the user, reporting a bad one.
    fn parse_document_id(&mut self, raw: &str) -> Option<Uuid> {
        match Uuid::parse_str(raw.trim()) {
            Ok(id) => Some(id),
            Err(_) => {
                self.view
                    .show_notice(&format!("Not a document id: {}", raw.trim()));
                None
            }
        }
    }

    async fn read_and_create(
        &self,
        path: &str,
        title: &str,
        category: Option<&str>,
    ) -> ApiResult<IngestResponse> {
        if title.trim().is_empty() {
            return Err(ValidationError::MissingTitle.into());
        }
        let content = tokio::fs::read_to_string(path).await?;
        let request = IngestRequest::new(title, &content, category);
        self.documents.create(&request).await
    }

    pub async fn list_documents(&mut self) {
        match self.documents.list().await {
            Ok(documents) => self.view.show_documents(&documents),
            Err(e) => self.report("list documents", e),
        }
    }

    pub async fn show_document(&mut self, raw_id: &str) {
        let Some(id) = self.parse_document_id(raw_id) else {
            return;
        };
        match self.documents.get(id).await {
            Ok(Some(document)) => self.view.show_document(&document),
            Ok(None) => self.view.show_notice("Document not found."),
            Err(e) => self.report("load document", e),
        }
    }

    /// Ingest the text of a local file as a new document.
    pub async fn ingest_document(&mut self, path: &str, title: &str, category: Option<&str>) {
        let result = self.read_and_create(path, title, category).await;

        match result {
            Ok(created) => self
                .view
                .show_notice(&format!("Saved document {}.", created.document_id)),
            Err(e) => self.report("ingest", e),
        }
    }

    /// Upload a local file as a new document.
    pub async fn upload_document(&mut self, path: &str, title: &str, category: Option<&str>) {
        let result = match UploadRequest::from_path(Path::new(path), title, category).await {
            Ok(request) => self.documents.upload(request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(created) => self
                .view
                .show_notice(&format!("Uploaded document {}.", created.document_id)),
            Err(e) => self.report("upload", e),
        }
    }

    /// Update a stored document in one PUT.
    ///
    /// `path` of `-` keeps the stored content. A missing or blank `title`
    /// or `category` keeps the stored value.
    pub async fn edit_document(
        &mut self,
        raw_id: &str,
        path: &str,
        title: Option<&str>,
        category: Option<&str>,
    ) {
        let Some(id) = self.parse_document_id(raw_id) else {
            return;
        };

        let existing = match self.documents.get(id).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                self.view.show_notice("Document not found.");
                return;
            }
            Err(e) => {
                self.report("load document", e);
                return;
            }
        };

        let content = if path == KEEP_CONTENT {
            existing.content.clone()
        } else {
            match tokio::fs::read_to_string(path).await {
                Ok(content) => content,
                Err(e) => {
                    self.report("edit", e.into());
                    return;
                }
            }
        };

        let title = non_blank(title).unwrap_or(existing.title.as_str());
        let category = non_blank(category).or(existing.category.as_deref());

        let request = IngestRequest::new(title, &content, category);
        match self.documents.update(id, &request).await {
            Ok(Some(_)) => self.view.show_notice(&format!("Updated document {}.", id)),
            Ok(None) => self.view.show_notice("Document not found."),
            Err(e) => self.report("edit", e),
        }
    }

    pub async fn delete_document(&mut self, raw_id: &str) {
        let Some(id) = self.parse_document_id(raw_id) else {
            return;
        };
        match self.documents.delete(id).await {
            Ok(true) => self.view.show_notice(&format!("Deleted document {}.", id)),
            Ok(false) => self.view.show_notice("Document not found."),
            Err(e) => self.report("delete document", e),
        }
    }
}
