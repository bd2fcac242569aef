//! View models for keyword metrics: comparison bars and the history table.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::keyword::{KeywordMetric, KeywordSuggestion, StoredKeyword};

const MAX_KD: f64 = 100.0;

/// Difficulty band used to colour a KD value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KdBand {
    Low,
    Medium,
    High,
}

impl KdBand {
    pub fn of(kd: f64) -> Self {
        if kd <= 30.0 {
            KdBand::Low
        } else if kd <= 60.0 {
            KdBand::Medium
        } else {
            KdBand::High
        }
    }
}

/// Bar widths for one keyword, as percentages of the track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBars {
    pub text: String,
    pub kd: f64,
    pub kd_band: KdBand,
    pub kd_percent: f64,
    pub volume: u64,
    pub volume_percent: f64,
}

/// Original vs suggested keyword, side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordComparison {
    pub reason: String,
    pub original: MetricBars,
    pub suggestion: MetricBars,
}

impl KeywordComparison {
    /// Volume bars share one scale: the larger of the two volumes (at least 1).
    pub fn from_suggestion(record: &KeywordSuggestion) -> Self {
        let max_volume = record
            .original
            .volume
            .max(record.suggestion.volume)
            .max(1) as f64;

        Self {
            reason: record.reason.clone(),
            original: bars(&record.original, max_volume),
            suggestion: bars(&record.suggestion, max_volume),
        }
    }
}

fn bars(metric: &KeywordMetric, max_volume: f64) -> MetricBars {
    MetricBars {
        text: metric.text.clone(),
        kd: metric.kd,
        kd_band: KdBand::of(metric.kd),
        kd_percent: (metric.kd / MAX_KD * 100.0).clamp(0.0, 100.0),
        volume: metric.volume,
        volume_percent: metric.volume as f64 / max_volume * 100.0,
    }
}

pub fn keyword_comparisons(suggestions: &[KeywordSuggestion]) -> Vec<KeywordComparison> {
    suggestions
        .iter()
        .map(KeywordComparison::from_suggestion)
        .collect()
}

/// One row of the saved-keyword table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub text: String,
    pub usage_count: u32,
    pub kd: f64,
    pub kd_band: KdBand,
    pub volume: u64,
    pub last_used: DateTime<Utc>,
}

impl From<StoredKeyword> for HistoryRow {
    fn from(entry: StoredKeyword) -> Self {
        Self {
            kd_band: KdBand::of(entry.kd),
            text: entry.text,
            usage_count: entry.usage_count,
            kd: entry.kd,
            volume: entry.volume,
            last_used: entry.last_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(orig_kd: f64, orig_vol: u64, sugg_kd: f64, sugg_vol: u64) -> KeywordSuggestion {
        KeywordSuggestion {
            original: KeywordMetric {
                text: "best laptops".to_string(),
                kd: orig_kd,
                volume: orig_vol,
            },
            suggestion: KeywordMetric {
                text: "best laptops for students".to_string(),
                kd: sugg_kd,
                volume: sugg_vol,
            },
            reason: "Narrower audience, easier to rank".to_string(),
        }
    }

    #[test]
    fn test_kd_band_boundaries() {
        assert_eq!(KdBand::of(0.0), KdBand::Low);
        assert_eq!(KdBand::of(30.0), KdBand::Low);
        assert_eq!(KdBand::of(30.5), KdBand::Medium);
        assert_eq!(KdBand::of(60.0), KdBand::Medium);
        assert_eq!(KdBand::of(61.0), KdBand::High);
        assert_eq!(KdBand::of(100.0), KdBand::High);
    }

    #[test]
    fn test_volume_bars_share_scale() {
        let comparison = KeywordComparison::from_suggestion(&record(72.0, 40_000, 35.0, 10_000));
        assert_eq!(comparison.original.volume_percent, 100.0);
        assert_eq!(comparison.suggestion.volume_percent, 25.0);
        assert_eq!(comparison.original.kd_percent, 72.0);
        assert_eq!(comparison.original.kd_band, KdBand::High);
        assert_eq!(comparison.suggestion.kd_band, KdBand::Medium);
    }

    #[test]
    fn test_zero_volumes_do_not_divide_by_zero() {
        let comparison = KeywordComparison::from_suggestion(&record(10.0, 0, 12.0, 0));
        assert_eq!(comparison.original.volume_percent, 0.0);
        assert_eq!(comparison.suggestion.volume_percent, 0.0);
    }

    #[test]
    fn test_history_row_carries_band() {
        let row = HistoryRow::from(StoredKeyword {
            text: "meal prep ideas".to_string(),
            kd: 18.0,
            volume: 6_600,
            usage_count: 2,
            last_used: Utc::now(),
        });
        assert_eq!(row.kd_band, KdBand::Low);
        assert_eq!(row.usage_count, 2);
    }
}
