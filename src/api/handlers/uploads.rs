use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use axum::extract::multipart::MultipartError;
use serde::Serialize;

use crate::{
    api::state::AppState,
    error::{AppError, Result},
    uploads::save_uploaded_file,
};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File too large (max 10 MB)".to_string())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

/// Accepts a single image in the multipart field `image`.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let data = field.bytes().await.map_err(multipart_error)?;

        let url = save_uploaded_file(
            &state.settings.server.uploads_dir,
            &filename,
            &content_type,
            &data,
        )
        .await?;

        return Ok((StatusCode::CREATED, Json(UploadResponse { url })));
    }

    Err(AppError::BadRequest("No image field in upload".to_string()))
}
