use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::{handlers::validated, state::AppState},
    domain::{Announcement, NewAnnouncement},
    error::{AppError, Result},
};

fn not_found() -> AppError {
    AppError::NotFound("Announcement not found".to_string())
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>> {
    let announcements = state.service_context.announcement_repo.list().await?;
    Ok(Json(announcements))
}

/// The newest announcement, or `null` when there are none.
pub async fn current(
    State(state): State<AppState>,
) -> Result<Json<Option<Announcement>>> {
    let announcement = state.service_context.announcement_repo.current().await?;
    Ok(Json(announcement))
}

pub async fn get(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Announcement>> {
    let Path(id) = id?;
    let announcement = state.service_context.announcement_repo
        .find_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(announcement))
}

pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewAnnouncement>, JsonRejection>,
) -> Result<(StatusCode, Json<Announcement>)> {
    let data = validated(payload)?;
    let announcement = state.service_context.announcement_repo.create(data).await?;

    tracing::info!(id = announcement.id, "announcement created");
    Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<NewAnnouncement>, JsonRejection>,
) -> Result<Json<Announcement>> {
    let Path(id) = id?;
    let data = validated(payload)?;
    let announcement = state.service_context.announcement_repo
        .update(id, data)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(announcement))
}

pub async fn delete(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;
    if !state.service_context.announcement_repo.delete(id).await? {
        return Err(not_found());
    }

    tracing::info!(id, "announcement deleted");
    Ok(StatusCode::NO_CONTENT)
}
