// View models the browser renders directly. Styling, clipboard and
// expand/collapse stay in the page; everything computed lives here.

pub mod handlers;
pub mod images;
pub mod keyword_view;

use serde::Serialize;

use crate::models::article::OptimizationResult;
use crate::presentation::keyword_view::{keyword_comparisons, KeywordComparison};

/// Results panel for a finished run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeView {
    pub status: &'static str,
    pub result: OptimizationResult,
    pub keyword_comparisons: Vec<KeywordComparison>,
    pub images_available: bool,
}

impl OptimizeView {
    pub fn done(result: OptimizationResult) -> Self {
        let keyword_comparisons =
            keyword_comparisons(&result.article.keyword_analysis.suggested_keywords);
        let images_available = !result.cover_images.is_empty();
        Self {
            status: "done",
            result,
            keyword_comparisons,
            images_available,
        }
    }
}
