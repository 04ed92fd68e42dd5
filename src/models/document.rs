use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of `GET /api/documents`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub document_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub chunk_count: u32,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Body of `GET /api/documents/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetail {
    pub document_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub chunk_count: u32,
}

/// Body of `POST /api/documents` and `PUT /api/documents/{id}`
///
/// A blank category is sent as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

impl IngestRequest {
    /// Build a request from raw form input, trimming every field.
    pub fn new(title: &str, content: &str, category: Option<&str>) -> Self {
        Self {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            category: normalize_category(category),
        }
    }
}

/// Response of create/upload/update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    #[serde(default)]
    pub message: String,
    pub document_id: Uuid,
}

/// Trim a category and map blank to `None`.
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Category as displayed in listings
pub fn display_category(category: &Option<String>) -> &str {
    match category.as_deref() {
        Some(c) if !c.is_empty() => c,
        _ => "-",
    }
}
