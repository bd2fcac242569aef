//! Durable storage for the keyword history.
//!
//! A backend is a single slot holding the serialized history. `HistoryStore`
//! layers the history semantics on top: soft loads, whole-value saves, clears.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tracing::{debug, warn};

use crate::keywords::history::KeywordHistory;
use crate::models::keyword::StoredKeyword;

pub const DEFAULT_REDIS_KEY: &str = "refiner:preferred_keywords";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// One logical key-value slot. `read` returns `None` when nothing has been saved.
#[async_trait]
pub trait HistoryBackend: Send + Sync {
    async fn read(&self) -> Result<Option<String>, StoreError>;
    async fn write(&self, payload: &str) -> Result<(), StoreError>;
    async fn remove(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: HistoryBackend + ?Sized> HistoryBackend for Arc<T> {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read().await
    }

    async fn write(&self, payload: &str) -> Result<(), StoreError> {
        (**self).write(payload).await
    }

    async fn remove(&self) -> Result<(), StoreError> {
        (**self).remove().await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FileBackend
// ────────────────────────────────────────────────────────────────────────────

/// JSON file on local disk. Writes replace the file via temp-file + rename.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryBackend for FileBackend {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, payload: &str) -> Result<(), StoreError> {
        let path = self.path.clone();
        let payload = payload.to_owned();
        tokio::task::spawn_blocking(move || write_atomically(&path, &payload))
            .await
            .map_err(|e| StoreError::Unavailable(format!("write task failed: {e}")))?
    }

    async fn remove(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn write_atomically(path: &Path, payload: &str) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(payload.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// RedisBackend
// ────────────────────────────────────────────────────────────────────────────

/// A single Redis string key. SET replaces the value atomically.
pub struct RedisBackend {
    client: redis::Client,
    key: String,
}

impl RedisBackend {
    pub fn new(client: redis::Client, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }
}

#[async_trait]
impl HistoryBackend for RedisBackend {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(&self.key).await?;
        Ok(value)
    }

    async fn write(&self, payload: &str) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(&self.key, payload).await?;
        Ok(())
    }

    async fn remove(&self) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(&self.key).await?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryBackend
// ────────────────────────────────────────────────────────────────────────────

/// In-process slot. `set_failing(true)` makes every operation error out;
/// `set_reads_failing` / `set_writes_failing` break only `read` / `write`.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryBackend {
    slot: Mutex<Option<String>>,
    failing: Mutex<bool>,
    reads_failing: Mutex<bool>,
    writes_failing: Mutex<bool>,
}

#[cfg(test)]
impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(payload.into())),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut flag) = self.failing.lock() {
            *flag = failing;
        }
    }

    pub fn set_reads_failing(&self, failing: bool) {
        if let Ok(mut flag) = self.reads_failing.lock() {
            *flag = failing;
        }
    }

    pub fn set_writes_failing(&self, failing: bool) {
        if let Ok(mut flag) = self.writes_failing.lock() {
            *flag = failing;
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn check(&self) -> Result<(), StoreError> {
        let failing = self.failing.lock().map(|f| *f).unwrap_or(true);
        if failing {
            return Err(StoreError::Unavailable("memory backend set to fail".to_string()));
        }
        Ok(())
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<String>) -> T) -> Result<T, StoreError> {
        self.check()?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StoreError::Unavailable("memory slot poisoned".to_string()))?;
        Ok(f(&mut slot))
    }
}

#[cfg(test)]
#[async_trait]
impl HistoryBackend for MemoryBackend {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        if self.reads_failing.lock().map(|f| *f).unwrap_or(true) {
            return Err(StoreError::Unavailable("memory backend reads set to fail".to_string()));
        }
        self.with_slot(|slot| slot.clone())
    }

    async fn write(&self, payload: &str) -> Result<(), StoreError> {
        if self.writes_failing.lock().map(|f| *f).unwrap_or(true) {
            return Err(StoreError::Unavailable("memory backend writes set to fail".to_string()));
        }
        self.with_slot(|slot| *slot = Some(payload.to_owned()))
    }

    async fn remove(&self) -> Result<(), StoreError> {
        self.with_slot(|slot| *slot = None)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HistoryStore
// ────────────────────────────────────────────────────────────────────────────

/// The keyword history persisted in one backend slot.
pub struct HistoryStore {
    backend: Box<dyn HistoryBackend>,
}

impl HistoryStore {
    pub fn new(backend: Box<dyn HistoryBackend>) -> Self {
        Self { backend }
    }

    /// Reads the persisted history. Never fails: a missing slot, an unreadable
    /// backend or corrupt JSON all yield an empty history.
    pub async fn load(&self) -> KeywordHistory {
        match self.try_load().await {
            Ok(history) => history,
            Err(StoreError::Serialize(e)) => {
                warn!("Stored keyword history is malformed, ignoring it: {e}");
                KeywordHistory::new()
            }
            Err(e) => {
                warn!("Keyword history unavailable, starting empty: {e}");
                KeywordHistory::new()
            }
        }
    }

    /// Strict variant of [`load`](Self::load). Only a missing slot reads as
    /// empty; backend errors and corrupt JSON are returned to the caller.
    pub async fn try_load(&self) -> Result<KeywordHistory, StoreError> {
        let Some(raw) = self.backend.read().await? else {
            return Ok(KeywordHistory::new());
        };
        let entries: Vec<StoredKeyword> = serde_json::from_str(&raw)?;
        let history = KeywordHistory::from_entries(entries);
        debug!("Loaded {} stored keywords", history.len());
        Ok(history)
    }

    /// Replaces the persisted history with `history`.
    pub async fn save(&self, history: &KeywordHistory) -> Result<(), StoreError> {
        let payload = serde_json::to_string(history)?;
        self.backend.write(&payload).await?;
        debug!("Saved {} stored keywords", history.len());
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::history::{list_sorted_by_recency, merge};
    use crate::models::keyword::{KeywordMetric, KeywordSuggestion};
    use chrono::Utc;

    fn accepted(text: &str) -> KeywordSuggestion {
        KeywordSuggestion {
            original: KeywordMetric {
                text: format!("{text} old"),
                kd: 70.0,
                volume: 500,
            },
            suggestion: KeywordMetric {
                text: text.to_string(),
                kd: 25.0,
                volume: 2400,
            },
            reason: "Better intent match".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_missing_slot_is_empty() {
        let store = HistoryStore::new(Box::new(MemoryBackend::new()));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_json_is_empty() {
        let store = HistoryStore::new(Box::new(MemoryBackend::with_payload("{not json")));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_wrong_shape_is_empty() {
        let store = HistoryStore::new(Box::new(MemoryBackend::with_payload(
            r#"{"text": "an object, not a list"}"#,
        )));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_unavailable_backend_is_empty() {
        let backend = MemoryBackend::with_payload("[]");
        backend.set_failing(true);
        let store = HistoryStore::new(Box::new(backend));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_try_load_reports_read_and_parse_failures() {
        let backend = MemoryBackend::with_payload("[]");
        backend.set_reads_failing(true);
        let store = HistoryStore::new(Box::new(backend));
        assert!(matches!(store.try_load().await, Err(StoreError::Unavailable(_))));

        let store = HistoryStore::new(Box::new(MemoryBackend::with_payload("{not json")));
        assert!(matches!(store.try_load().await, Err(StoreError::Serialize(_))));
    }

    #[tokio::test]
    async fn test_try_load_missing_slot_is_empty() {
        let store = HistoryStore::new(Box::new(MemoryBackend::new()));
        assert!(store.try_load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_entries_and_order() {
        let store = HistoryStore::new(Box::new(MemoryBackend::new()));
        let history = merge(
            &KeywordHistory::new(),
            &[accepted("first keyword"), accepted("second keyword")],
            Utc::now(),
        );
        store.save(&history).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded, history);
    }

    #[tokio::test]
    async fn test_clear_then_load_is_empty() {
        let store = HistoryStore::new(Box::new(MemoryBackend::new()));
        let history = merge(&KeywordHistory::new(), &[accepted("to clear")], Utc::now());
        store.save(&history).await.unwrap();

        store.clear().await.unwrap();

        let loaded = store.load().await;
        assert!(loaded.is_empty());
        assert!(list_sorted_by_recency(&loaded).is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let backend = Arc::new(MemoryBackend::new());
        let store = HistoryStore::new(Box::new(backend.clone()));
        backend.set_failing(true);

        let history = merge(&KeywordHistory::new(), &[accepted("unsaved")], Utc::now());
        assert!(store.save(&history).await.is_err());
    }

    #[tokio::test]
    async fn test_persisted_format_is_camel_case_array() {
        let backend = Arc::new(MemoryBackend::new());
        let store = HistoryStore::new(Box::new(backend.clone()));
        let history = merge(&KeywordHistory::new(), &[accepted("format check")], Utc::now());
        store.save(&history).await.unwrap();

        let raw = backend.raw().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["text"], "format check");
        assert_eq!(first["usageCount"], 1);
        assert!(first.get("lastUsed").is_some());
    }

    #[tokio::test]
    async fn test_file_backend_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("keyword_history.json");
        let store = HistoryStore::new(Box::new(FileBackend::new(&path)));

        assert!(store.load().await.is_empty());

        let history = merge(&KeywordHistory::new(), &[accepted("on disk")], Utc::now());
        store.save(&history).await.unwrap();
        assert!(path.exists());
        assert_eq!(store.load().await, history);

        store.clear().await.unwrap();
        assert!(!path.exists());
        assert!(store.load().await.is_empty());

        // clearing twice is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_backend_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyword_history.json");
        std::fs::write(&path, "[{\"text\": \"half written").unwrap();

        let store = HistoryStore::new(Box::new(FileBackend::new(&path)));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_file_backend_overwrite_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyword_history.json");
        let store = HistoryStore::new(Box::new(FileBackend::new(&path)));

        let first = merge(&KeywordHistory::new(), &[accepted("one")], Utc::now());
        let second = merge(&first, &[accepted("two")], Utc::now());
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        assert_eq!(store.load().await.len(), 2);
    }
}
