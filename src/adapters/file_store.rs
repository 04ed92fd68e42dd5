//! File-based conversation store adapter.
//!
//! Persists the active conversation id as a small JSON document inside the
//! client's state directory.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::traits::{ConversationStore, StoreError};

/// File name inside the state directory.
pub const CONVERSATION_FILE: &str = "conversation.json";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredConversation {
    conversation_id: String,
}

/// File-based conversation store.
///
/// The file holds `{"conversationId": "..."}`. A missing file means no
/// active conversation; an unreadable or malformed one is reported as
/// [`StoreError::LoadFailed`] so the caller can start fresh.
#[derive(Debug, Clone)]
pub struct FileConversationStore {
    path: PathBuf,
}

impl FileConversationStore {
    /// Store the id in `state_dir/conversation.json`.
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(CONVERSATION_FILE),
        }
    }

    /// Store the id at an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationStore for FileConversationStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path).map_err(|e| StoreError::LoadFailed(e.to_string()))?;
        let stored: StoredConversation = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StoreError::LoadFailed(e.to_string()))?;

        if stored.conversation_id.is_empty() {
            Ok(None)
        } else {
            Ok(Some(stored.conversation_id))
        }
    }

    fn save(&self, conversation_id: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::SaveFailed(e.to_string()))?;
            }
        }

        let file = File::create(&self.path).map_err(|e| StoreError::SaveFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        let stored = StoredConversation {
            conversation_id: conversation_id.to_string(),
        };
        serde_json::to_writer(&mut writer, &stored)
            .map_err(|e| StoreError::SaveFailed(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| StoreError::SaveFailed(e.to_string()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.path).map_err(|e| StoreError::ClearFailed(e.to_string()))
    }
}
