use std::sync::Arc;

use crate::keywords::service::KeywordHistoryService;
use crate::llm_client::GenerativeBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generative service. Default: GeminiClient.
    pub llm: Arc<dyn GenerativeBackend>,
    /// Saved keyword history, shared by the optimize and keyword routes.
    pub history: KeywordHistoryService,
}
