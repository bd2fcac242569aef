use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A keyword and its estimated difficulty / monthly search volume at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetric {
    pub text: String,
    /// Keyword Difficulty, 0-100.
    pub kd: f64,
    #[serde(deserialize_with = "deserialize_volume")]
    pub volume: u64,
}

impl KeywordMetric {
    /// Checks the difficulty score is on the 0-100 scale.
    pub fn validate_kd(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.kd) {
            return Err(format!("kd {} is outside 0-100", self.kd));
        }
        Ok(())
    }

    /// Non-blank text and an in-range difficulty score.
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("text is empty".to_string());
        }
        self.validate_kd()
    }
}

/// One proposed keyword replacement returned by an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSuggestion {
    pub original: KeywordMetric,
    pub suggestion: KeywordMetric,
    pub reason: String,
}

/// Persistent aggregate for one distinct keyword the user has accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredKeyword {
    pub text: String,
    pub kd: f64,
    #[serde(deserialize_with = "deserialize_volume")]
    pub volume: u64,
    pub usage_count: u32,
    pub last_used: DateTime<Utc>,
}

/// The model is asked for an integer volume but may send `1200.0`; accept any
/// non-negative number and round it.
fn deserialize_volume<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "volume must be a non-negative number, got {raw}"
        )));
    }
    Ok(raw.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_accepts_float_and_rounds() {
        let metric: KeywordMetric =
            serde_json::from_str(r#"{"text": "rust web", "kd": 42.5, "volume": 1199.6}"#).unwrap();
        assert_eq!(metric.volume, 1200);
        assert_eq!(metric.kd, 42.5);
    }

    #[test]
    fn test_validate_bounds_kd() {
        let mut metric = KeywordMetric {
            text: "rust web".to_string(),
            kd: 0.0,
            volume: 10,
        };
        assert!(metric.validate().is_ok());
        metric.kd = 100.0;
        assert!(metric.validate().is_ok());
        metric.kd = -40.0;
        assert!(metric.validate_kd().is_err());
        metric.kd = 9000.0;
        assert_eq!(metric.validate().unwrap_err(), "kd 9000 is outside 0-100");
    }

    #[test]
    fn test_validate_rejects_blank_text_but_kd_check_ignores_it() {
        let metric = KeywordMetric {
            text: "   ".to_string(),
            kd: 20.0,
            volume: 10,
        };
        assert_eq!(metric.validate().unwrap_err(), "text is empty");
        assert!(metric.validate_kd().is_ok());
    }

    #[test]
    fn test_negative_volume_is_rejected() {
        let result: Result<KeywordMetric, _> =
            serde_json::from_str(r#"{"text": "rust web", "kd": 10, "volume": -5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_stored_keyword_uses_camel_case_fields() {
        let json = r#"{
            "text": "async rust",
            "kd": 35,
            "volume": 880,
            "usageCount": 2,
            "lastUsed": "2024-05-01T10:00:00.000Z"
        }"#;
        let stored: StoredKeyword = serde_json::from_str(json).unwrap();
        assert_eq!(stored.usage_count, 2);
        assert_eq!(stored.volume, 880);

        let value = serde_json::to_value(&stored).unwrap();
        assert!(value.get("usageCount").is_some());
        assert!(value.get("lastUsed").is_some());
    }
}
