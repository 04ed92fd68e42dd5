//! Conversation store trait abstraction.
//!
//! Holds the active conversation id between runs of the client, the way a
//! browser tab keeps it in session storage.

/// Conversation store errors.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Failed to load the stored id
    LoadFailed(String),
    /// Failed to save the id
    SaveFailed(String),
    /// Failed to clear the stored id
    ClearFailed(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::LoadFailed(msg) => write!(f, "Failed to load conversation id: {}", msg),
            StoreError::SaveFailed(msg) => write!(f, "Failed to save conversation id: {}", msg),
            StoreError::ClearFailed(msg) => {
                write!(f, "Failed to clear conversation id: {}", msg)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Trait for persisting the active conversation id.
///
/// Calls are synchronous: ids are tiny and saves happen on the app loop the
/// moment a `conversationId` event is applied.
///
/// # Example
///
/// ```ignore
/// use ragchat::traits::ConversationStore;
///
/// fn restore_or_create<S: ConversationStore>(store: &S) -> String {
///     match store.load() {
///         Ok(Some(id)) => id,
///         _ => {
///             let id = uuid::Uuid::new_v4().to_string();
///             let _ = store.save(&id);
///             id
///         }
///     }
/// }
/// ```
pub trait ConversationStore: Send + Sync {
    /// Load the stored id.
    ///
    /// # Returns
    /// - `Ok(Some(id))` if an id is stored
    /// - `Ok(None)` if nothing is stored
    /// - `Err(error)` if loading failed
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored id.
    fn save(&self, conversation_id: &str) -> Result<(), StoreError>;

    /// Forget the stored id.
    fn clear(&self) -> Result<(), StoreError>;
}
