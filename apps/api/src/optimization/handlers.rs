//! Axum route handlers for the Optimization API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::optimization::pipeline::optimize;
use crate::optimization::request::OptimizeRequest;
use crate::presentation::OptimizeView;
use crate::state::AppState;

/// POST /api/v1/optimize
///
/// Full run: validate → article call → cover images. The saved keyword
/// history is passed to the model as preferred keywords.
/// Image failures still return 200 with `imagesAvailable: false`.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeView>, AppError> {
    let history = state.history.clone();
    let result = optimize(state.llm.as_ref(), &request, || async move {
        history.preferred_keywords().await
    })
    .await?;

    Ok(Json(OptimizeView::done(result)))
}
