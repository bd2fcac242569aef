use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::keywords::history::{merge, mergeable_count, preferred_texts, KeywordHistory};
use crate::keywords::store::{HistoryStore, StoreError};
use crate::models::keyword::KeywordSuggestion;

/// Outcome of accepting a batch of suggestions.
///
/// `history` is the merged history even when `persisted` is false, so the
/// caller never loses what the user just accepted.
#[derive(Debug, Clone)]
pub struct AcceptOutcome {
    /// Records folded in; blank suggestion texts are not counted.
    pub accepted: usize,
    pub history: KeywordHistory,
    pub persisted: bool,
    pub warning: Option<String>,
}

/// Shared handle over the history store.
///
/// Every load → merge → save cycle and every clear runs under one lock, so
/// concurrent requests within this process cannot lose each other's updates.
#[derive(Clone)]
pub struct KeywordHistoryService {
    store: Arc<Mutex<HistoryStore>>,
}

impl KeywordHistoryService {
    pub fn new(store: HistoryStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn load(&self) -> KeywordHistory {
        self.store.lock().await.load().await
    }

    /// Keyword texts to hint the optimizer with.
    pub async fn preferred_keywords(&self) -> Vec<String> {
        let history = self.load().await;
        if history.is_empty() {
            debug!("No saved keywords to prefer");
        }
        preferred_texts(&history)
    }

    /// Loads, merges and saves under the lock.
    ///
    /// When the stored history cannot be read, nothing is written: the batch is
    /// merged into an empty history for the caller and reported as not persisted.
    pub async fn accept(&self, suggestions: &[KeywordSuggestion]) -> AcceptOutcome {
        let accepted = mergeable_count(suggestions);
        let store = self.store.lock().await;

        let current = match store.try_load().await {
            Ok(current) => current,
            Err(e) => {
                warn!("Keyword history unreadable, skipping save: {e}");
                return AcceptOutcome {
                    accepted,
                    history: merge(&KeywordHistory::new(), suggestions, Utc::now()),
                    persisted: false,
                    warning: Some(format!(
                        "Keywords were not saved: stored history could not be read ({e})"
                    )),
                };
            }
        };
        let merged = merge(&current, suggestions, Utc::now());

        match store.save(&merged).await {
            Ok(()) => {
                info!(
                    "Accepted {accepted} keyword suggestions ({} stored keywords)",
                    merged.len()
                );
                AcceptOutcome {
                    accepted,
                    history: merged,
                    persisted: true,
                    warning: None,
                }
            }
            Err(e) => {
                warn!("Failed to persist keyword history: {e}");
                AcceptOutcome {
                    accepted,
                    history: merged,
                    persisted: false,
                    warning: Some(format!("Keywords were not saved: {e}")),
                }
            }
        }
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.lock().await.clear().await?;
        info!("Keyword history cleared");
        Ok(())
    }
}
