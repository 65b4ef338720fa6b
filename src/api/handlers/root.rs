use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde_json::json;

use crate::api::state::AppState;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Yeram Church API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Announcements, gallery and weekly services for the church website",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "announcements": "/api/announcements",
            "gallery": "/api/gallery",
            "weekly_services": "/api/weekly-services",
            "upload": "/api/upload",
            "admin": "/api/admin/login"
        }
    }))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.service_context.announcement_repo.current().await {
        Ok(_) => (StatusCode::OK, Json(json!({
            "status": "healthy",
            "storage": state.service_context.storage_backend,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({
                "status": "unhealthy",
                "storage": state.service_context.storage_backend,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })))
        }
    }
}
