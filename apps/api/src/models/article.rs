use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::keyword::KeywordSuggestion;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub suggested_keywords: Vec<KeywordSuggestion>,
}

/// Phase-1 output: the rewritten article exactly as the text model returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedArticle {
    pub refined_title: String,
    pub keyword_analysis: KeywordAnalysis,
    pub refined_content_html: String,
    pub fetched_content_text: String,
}

/// A generated cover image. `data` is the base64 payload from the image model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub mime_type: String,
    pub data: String,
}

/// Everything one optimization run produced. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub run_id: Uuid,
    pub article: OptimizedArticle,
    pub cover_images: Vec<CoverImage>,
}
