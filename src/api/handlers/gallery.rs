use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    api::{handlers::validated, state::AppState},
    domain::{CategoryFilter, GalleryPhoto, NewGalleryPhoto},
    error::{AppError, Result},
    uploads,
};

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    params: std::result::Result<Query<GalleryQuery>, QueryRejection>,
) -> Result<Json<Vec<GalleryPhoto>>> {
    let Query(params) = params?;
    let filter = CategoryFilter::parse(params.category.as_deref())
        .map_err(AppError::BadRequest)?;

    let repo = &state.service_context.gallery_repo;
    let photos = match filter {
        CategoryFilter::All => repo.list().await?,
        CategoryFilter::Only(category) => repo.list_by_category(category).await?,
    };

    Ok(Json(photos))
}

pub async fn get(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<GalleryPhoto>> {
    let Path(id) = id?;
    let photo = state.service_context.gallery_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Photo not found".to_string()))?;

    Ok(Json(photo))
}

pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewGalleryPhoto>, JsonRejection>,
) -> Result<(StatusCode, Json<GalleryPhoto>)> {
    let data = validated(payload)?;
    let photo = state.service_context.gallery_repo.create(data).await?;

    tracing::info!(id = photo.id, category = %photo.category, "gallery photo added");
    Ok((StatusCode::CREATED, Json(photo)))
}

/// Deletes the record and, when it points at a local upload no other photo
/// still uses, the image file too.
pub async fn delete(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;
    let repo = &state.service_context.gallery_repo;
    let photo = repo.find_by_id(id).await?;

    if !repo.delete(id).await? {
        return Err(AppError::NotFound("Photo not found".to_string()));
    }

    if let Some(photo) = photo {
        let still_used = repo.list().await?.iter().any(|p| p.url == photo.url);
        if still_used {
            tracing::debug!(id, url = %photo.url, "image still referenced, keeping file");
        } else if let Err(e) = uploads::delete_uploaded_file(&state.settings.server.uploads_dir, &photo.url).await {
            tracing::warn!(id, url = %photo.url, "failed to remove uploaded image: {}", e);
        }
    }

    tracing::info!(id, "gallery photo deleted");
    Ok(StatusCode::NO_CONTENT)
}
