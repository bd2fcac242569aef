//! Optimization pipeline — the two-phase call sequence behind one run.
//!
//! Flow: validate → article call (fatal on failure) → cover image call
//!       (failure degrades to no images) → done.
//!
//! The image prompt depends on the refined title, so the calls are sequential.

use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{call_json, GenerativeBackend, LlmError};
use crate::models::article::{CoverImage, OptimizationResult, OptimizedArticle};
use crate::optimization::request::{
    build_article_request, build_image_request, ArticleInput, OptimizeRequest,
};

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Validating,
    FetchingArticle,
    FetchingImages,
    Done,
    Failed,
}

impl RunPhase {
    /// Legal transitions. `Failed` is reachable only from `Validating` and
    /// `FetchingArticle`; an image failure still ends in `Done`.
    pub fn can_transition_to(self, next: RunPhase) -> bool {
        use RunPhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, FetchingArticle)
                | (Validating, Failed)
                | (FetchingArticle, FetchingImages)
                | (FetchingArticle, Failed)
                | (FetchingImages, Done)
        )
    }
}

/// Records the phases a run passes through.
#[derive(Debug)]
pub struct RunTracker {
    run_id: Uuid,
    phase: RunPhase,
    history: Vec<RunPhase>,
}

impl RunTracker {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            phase: RunPhase::Idle,
            history: vec![RunPhase::Idle],
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn history(&self) -> &[RunPhase] {
        &self.history
    }

    fn advance(&mut self, next: RunPhase) {
        if !self.phase.can_transition_to(next) {
            // Programming error; keep the run going but make it visible.
            warn!(
                "Run {}: unexpected transition {:?} -> {:?}",
                self.run_id, self.phase, next
            );
        }
        info!("Run {}: {:?} -> {:?}", self.run_id, self.phase, next);
        self.phase = next;
        self.history.push(next);
    }
}

/// Runs one optimization end to end.
///
/// `preferred_keywords` is only consulted after the input validates, so an
/// invalid request never touches the history or the model.
pub async fn optimize<F, Fut>(
    backend: &dyn GenerativeBackend,
    request: &OptimizeRequest,
    preferred_keywords: F,
) -> Result<OptimizationResult, AppError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Vec<String>>,
{
    let run_id = Uuid::new_v4();
    let mut tracker = RunTracker::new(run_id);
    let span = info_span!("optimization_run", %run_id);

    let outcome = run(backend, request, preferred_keywords, &mut tracker)
        .instrument(span)
        .await;

    outcome.map(|(article, cover_images)| OptimizationResult {
        run_id,
        article,
        cover_images,
    })
}

async fn run<F, Fut>(
    backend: &dyn GenerativeBackend,
    request: &OptimizeRequest,
    preferred_keywords: F,
    tracker: &mut RunTracker,
) -> Result<(OptimizedArticle, Vec<CoverImage>), AppError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Vec<String>>,
{
    tracker.advance(RunPhase::Validating);
    let input = match request.validate() {
        Ok(input) => input,
        Err(e) => {
            tracker.advance(RunPhase::Failed);
            return Err(e);
        }
    };

    let keywords = preferred_keywords().await;

    tracker.advance(RunPhase::FetchingArticle);
    let article = match fetch_article(backend, &input, &keywords).await {
        Ok(article) => article,
        Err(e) => {
            tracker.advance(RunPhase::Failed);
            warn!("Article optimization failed: {e}");
            return Err(AppError::Llm(format!(
                "Failed to optimize article. Gemini API error: {e}"
            )));
        }
    };
    info!(
        "Article optimized: {} keyword suggestions",
        article.keyword_analysis.suggested_keywords.len()
    );

    tracker.advance(RunPhase::FetchingImages);
    let cover_images = fetch_cover_images(backend, &article.refined_title).await;

    tracker.advance(RunPhase::Done);
    info!("Run finished in {:?} via {:?}", tracker.phase(), tracker.history());
    Ok((article, cover_images))
}

#[derive(Debug, thiserror::Error)]
enum ArticleError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("response did not match the expected shape: {0}")]
    NonConforming(String),
}

async fn fetch_article(
    backend: &dyn GenerativeBackend,
    input: &ArticleInput,
    preferred_keywords: &[String],
) -> Result<OptimizedArticle, ArticleError> {
    let request = build_article_request(input, preferred_keywords);
    let article: OptimizedArticle = call_json(backend, &request).await?;
    validate_article(&article).map_err(ArticleError::NonConforming)?;
    Ok(article)
}

/// Checks what the schema cannot enforce on its own.
pub fn validate_article(article: &OptimizedArticle) -> Result<(), String> {
    if article.refined_title.trim().is_empty() {
        return Err("refinedTitle is empty".to_string());
    }

    for (i, record) in article.keyword_analysis.suggested_keywords.iter().enumerate() {
        for (label, metric) in [("original", &record.original), ("suggestion", &record.suggestion)] {
            metric
                .validate()
                .map_err(|e| format!("suggestedKeywords[{i}].{label}.{e}"))?;
        }
    }

    let count = article.keyword_analysis.suggested_keywords.len();
    if !(3..=5).contains(&count) {
        warn!("Expected 3-5 keyword suggestions, model returned {count}");
    }

    Ok(())
}

/// Never fails: an image error is logged and yields no images.
async fn fetch_cover_images(backend: &dyn GenerativeBackend, refined_title: &str) -> Vec<CoverImage> {
    let request = build_image_request(refined_title);
    match backend.generate_images(&request).await {
        Ok(images) => {
            info!("Generated {} cover images", images.len());
            images
        }
        Err(e) => {
            warn!("Image generation failed, returning article without covers: {e}");
            Vec::new()
        }
    }
}
