//! In-memory conversation store for testing.

use std::sync::{Arc, Mutex};

use crate::traits::{ConversationStore, StoreError};

/// In-memory conversation store.
///
/// Clones share state, so a test can keep a handle after moving the store
/// into the app.
///
/// # Example
///
/// ```ignore
/// use ragchat::adapters::mock::InMemoryConversationStore;
/// use ragchat::traits::ConversationStore;
///
/// let store = InMemoryConversationStore::new();
/// assert!(store.load()?.is_none());
///
/// store.save("conv-1")?;
/// assert_eq!(store.load()?, Some("conv-1".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    /// Stored id
    conversation_id: Arc<Mutex<Option<String>>>,
    /// Every id passed to `save`, in order
    saves: Arc<Mutex<Vec<String>>>,
    /// Whether save should fail
    save_should_fail: Arc<Mutex<bool>>,
    /// Whether load should fail
    load_should_fail: Arc<Mutex<bool>>,
    /// Whether clear should fail
    clear_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryConversationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `conversation_id`.
    pub fn with_id(conversation_id: &str) -> Self {
        let store = Self::default();
        *store.conversation_id.lock().unwrap() = Some(conversation_id.to_string());
        store
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Current id, bypassing the failure flags.
    pub fn current(&self) -> Option<String> {
        self.conversation_id.lock().unwrap().clone()
    }

    /// Every successfully saved id, oldest first.
    pub fn saves(&self) -> Vec<String> {
        self.saves.lock().unwrap().clone()
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(StoreError::LoadFailed("Mock load failure".to_string()));
        }

        Ok(self.conversation_id.lock().unwrap().clone())
    }

    fn save(&self, conversation_id: &str) -> Result<(), StoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(StoreError::SaveFailed("Mock save failure".to_string()));
        }

        *self.conversation_id.lock().unwrap() = Some(conversation_id.to_string());
        self.saves.lock().unwrap().push(conversation_id.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(StoreError::ClearFailed("Mock clear failure".to_string()));
        }

        *self.conversation_id.lock().unwrap() = None;
        Ok(())
    }
}
