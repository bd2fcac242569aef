//! Keyword history — the merge model behind "Confirm & Use Keywords".
//!
//! The history is keyed by keyword text and kept in insertion order. Only the
//! *suggested* keyword of an accepted record is tracked; the original keyword's
//! metrics are dropped on acceptance.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::keyword::{KeywordSuggestion, StoredKeyword};

/// Ordered collection of stored keywords, unique by (trimmed) text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KeywordHistory {
    entries: Vec<StoredKeyword>,
}

impl KeywordHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from raw stored records, restoring the uniqueness invariant.
    ///
    /// Blank texts are dropped. A repeated text keeps the position of its first
    /// occurrence and the values of its last. A zero usage count is raised to 1.
    pub fn from_entries(raw: Vec<StoredKeyword>) -> Self {
        let mut history = Self::new();
        for mut entry in raw {
            let key = normalize(&entry.text);
            if key.is_empty() {
                continue;
            }
            entry.text = key.to_string();
            entry.usage_count = entry.usage_count.max(1);
            match history.position(&entry.text) {
                Some(idx) => history.entries[idx] = entry,
                None => history.entries.push(entry),
            }
        }
        history
    }

    pub fn entries(&self) -> &[StoredKeyword] {
        &self.entries
    }

    #[cfg(test)]
    pub fn get(&self, text: &str) -> Option<&StoredKeyword> {
        self.position(text).map(|idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, text: &str) -> Option<usize> {
        let key = normalize(text);
        self.entries.iter().position(|e| e.text == key)
    }
}

fn normalize(text: &str) -> &str {
    text.trim()
}

/// Folds accepted suggestions into a copy of `history`.
///
/// Records are applied in order. An existing text gets `usage_count + 1` and the
/// suggestion's kd / volume with `last_used = now`; a new text is appended with a
/// usage count of 1. Repeats within one batch apply cumulatively.
pub fn merge(
    history: &KeywordHistory,
    accepted: &[KeywordSuggestion],
    now: DateTime<Utc>,
) -> KeywordHistory {
    let mut merged = history.clone();

    for record in accepted {
        let metric = &record.suggestion;
        let key = normalize(&metric.text);
        if key.is_empty() {
            continue;
        }

        match merged.position(key) {
            Some(idx) => {
                let existing = &mut merged.entries[idx];
                existing.usage_count = existing.usage_count.saturating_add(1);
                existing.kd = metric.kd;
                existing.volume = metric.volume;
                existing.last_used = now;
            }
            None => merged.entries.push(StoredKeyword {
                text: key.to_string(),
                kd: metric.kd,
                volume: metric.volume,
                usage_count: 1,
                last_used: now,
            }),
        }
    }

    merged
}

/// Number of records `merge` will fold in; blank suggestion texts are skipped.
pub fn mergeable_count(accepted: &[KeywordSuggestion]) -> usize {
    accepted
        .iter()
        .filter(|record| !normalize(&record.suggestion.text).is_empty())
        .count()
}

/// Snapshot of the history ordered by `last_used`, newest first. Ties keep storage order.
pub fn list_sorted_by_recency(history: &KeywordHistory) -> Vec<StoredKeyword> {
    let mut sorted = history.entries().to_vec();
    // sort_by is stable
    sorted.sort_by(|a, b| b.last_used.cmp(&a.last_used));
    sorted
}

/// Keyword texts passed to the optimizer as topic-continuity hints.
pub fn preferred_texts(history: &KeywordHistory) -> Vec<String> {
    history.entries().iter().map(|e| e.text.clone()).collect()
}
