//! Conversation log persistence.
//!
//! The whole history is written as one JSON array under a single key of an
//! external key-value backend. Saving and loading are best effort: failures
//! are logged and the caller carries on with its in-memory state.

use async_trait::async_trait;
use novo_core::config::DEFAULT_STORAGE_KEY;
use novo_core::Conversation;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend refused the operation (offline, quota, bad key...).
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal string key-value contract the log is persisted through.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct ConversationStore {
    backend: Arc<dyn KeyValueBackend>,
    key: String,
}

impl ConversationStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: Arc<dyn KeyValueBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the stored history. Never fails; errors are logged.
    pub async fn save(&self, history: &[Conversation]) {
        if let Err(e) = self.try_save(history).await {
            tracing::warn!(key = %self.key, "Failed to save conversations: {}", e);
        }
    }

    pub async fn try_save(&self, history: &[Conversation]) -> StoreResult<()> {
        let blob = serde_json::to_string(history)?;
        self.backend.set(&self.key, &blob).await?;
        tracing::debug!(key = %self.key, count = history.len(), bytes = blob.len(), "Saved conversations");
        Ok(())
    }

    /// Read the stored history. Missing, unreadable or malformed data yields
    /// an empty history.
    pub async fn load(&self) -> Vec<Conversation> {
        match self.try_load().await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(key = %self.key, "Failed to load conversations: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_load(&self) -> StoreResult<Vec<Conversation>> {
        match self.backend.get(&self.key).await? {
            Some(blob) if !blob.trim().is_empty() => {
                let history: Vec<Conversation> = serde_json::from_str(&blob)?;
                tracing::debug!(key = %self.key, count = history.len(), "Loaded conversations");
                Ok(history)
            }
            _ => Ok(Vec::new()),
        }
    }
}
