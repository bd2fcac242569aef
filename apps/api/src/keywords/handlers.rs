use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::keywords::history::{list_sorted_by_recency, mergeable_count, KeywordHistory};
use crate::models::keyword::KeywordSuggestion;
use crate::presentation::keyword_view::HistoryRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub suggestions: Vec<KeywordSuggestion>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptResponse {
    pub accepted: usize,
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub history: Vec<HistoryRow>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub keywords: Vec<HistoryRow>,
}

/// POST /api/v1/keywords/accept
///
/// Folds the suggested keywords of a result into the saved history.
/// A storage failure is reported in the body; the merged history is still returned.
/// Difficulty scores outside 0-100 are rejected before anything is merged.
pub async fn handle_accept(
    State(state): State<AppState>,
    Json(request): Json<AcceptRequest>,
) -> Result<Json<AcceptResponse>, AppError> {
    if mergeable_count(&request.suggestions) == 0 {
        return Err(AppError::Validation(
            "No keyword suggestions to save.".to_string(),
        ));
    }
    for (i, record) in request.suggestions.iter().enumerate() {
        for (label, metric) in [("original", &record.original), ("suggestion", &record.suggestion)] {
            metric
                .validate_kd()
                .map_err(|e| AppError::Validation(format!("suggestions[{i}].{label}.{e}")))?;
        }
    }

    let outcome = state.history.accept(&request.suggestions).await;

    Ok(Json(AcceptResponse {
        accepted: outcome.accepted,
        persisted: outcome.persisted,
        warning: outcome.warning,
        history: rows(&outcome.history),
    }))
}

/// GET /api/v1/keywords/history
pub async fn handle_get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let history = state.history.load().await;
    Json(HistoryResponse {
        keywords: rows(&history),
    })
}

/// DELETE /api/v1/keywords/history
pub async fn handle_clear_history(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state
        .history
        .clear()
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

fn rows(history: &KeywordHistory) -> Vec<HistoryRow> {
    list_sorted_by_recency(history)
        .into_iter()
        .map(HistoryRow::from)
        .collect()
}
