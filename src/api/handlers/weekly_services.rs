use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::{handlers::validated, state::AppState},
    domain::{NewWeeklyService, WeeklyService},
    error::{AppError, Result},
};

fn not_found() -> AppError {
    AppError::NotFound("Weekly service not found".to_string())
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<WeeklyService>>> {
    let services = state.service_context.weekly_service_repo.list().await?;
    Ok(Json(services))
}

/// The newest weekly service, or `null` when there are none.
pub async fn current(
    State(state): State<AppState>,
) -> Result<Json<Option<WeeklyService>>> {
    let service = state.service_context.weekly_service_repo.current().await?;
    Ok(Json(service))
}

pub async fn get(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<WeeklyService>> {
    let Path(id) = id?;
    let service = state.service_context.weekly_service_repo
        .find_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(service))
}

pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewWeeklyService>, JsonRejection>,
) -> Result<(StatusCode, Json<WeeklyService>)> {
    let data = validated(payload)?;
    let service = state.service_context.weekly_service_repo.create(data).await?;

    tracing::info!(id = service.id, "weekly service created");
    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<NewWeeklyService>, JsonRejection>,
) -> Result<Json<WeeklyService>> {
    let Path(id) = id?;
    let data = validated(payload)?;
    let service = state.service_context.weekly_service_repo
        .update(id, data)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(service))
}

pub async fn delete(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;
    if !state.service_context.weekly_service_repo.delete(id).await? {
        return Err(not_found());
    }

    tracing::info!(id, "weekly service deleted");
    Ok(StatusCode::NO_CONTENT)
}
