//! Axum route handlers for cover image downloads.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::presentation::images::{cover_filename, decode_image};

#[derive(Debug, Deserialize)]
pub struct DownloadImageRequest {
    /// Base64 payload of the selected cover image.
    pub image: String,
    #[serde(default)]
    pub title: String,
}

/// POST /api/v1/images/download
///
/// Returns the selected cover image as a JPEG attachment named after the title.
pub async fn handle_download_image(
    Json(request): Json<DownloadImageRequest>,
) -> Result<Response, AppError> {
    if request.image.trim().is_empty() {
        return Err(AppError::Validation("No image selected.".to_string()));
    }

    let image = decode_image(&request.image)
        .map_err(|e| AppError::Validation(format!("Image payload is not valid base64: {e}")))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        cover_filename(&request.title)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(image),
    )
        .into_response())
}
