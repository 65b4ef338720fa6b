pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    Router,
    routing::{get, post, put, delete},
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
    uploads::MAX_FILE_SIZE,
};
use state::AppState;

/// Multipart framing on top of the largest accepted image.
const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE + 64 * 1024;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    settings: Arc<Settings>,
) -> Router {
    let uploads_dir = settings.server.uploads_dir.clone();
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        // Generated SEO text
        .route("/robots.txt", get(handlers::seo::robots_txt))
        .route("/sitemap.xml", get(handlers::seo::sitemap_xml))

        .nest("/api", api_routes(app_state.clone()))

        // Uploaded images
        .nest_service("/uploads", ServeDir::new(uploads_dir))

        // Add state to the router
        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/announcements", announcement_routes(state.clone()))
        .nest("/weekly-services", weekly_service_routes(state.clone()))
        .nest("/gallery", gallery_routes(state.clone()))
        .nest("/admin", admin_session_routes())
        .merge(upload_routes(state))
}

fn announcement_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Public reads
        .route("/", get(handlers::announcements::list))
        .route("/current", get(handlers::announcements::current))
        .route("/:id", get(handlers::announcements::get))
        // Admin writes
        .merge(Router::new()
            .route("/", post(handlers::announcements::create))
            .route("/:id", put(handlers::announcements::update))
            .route("/:id", delete(handlers::announcements::delete))
            .route_layer(axum::middleware::from_fn_with_state(
                state,
                middleware::auth::require_admin,
            ))
        )
}

fn weekly_service_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::weekly_services::list))
        .route("/current", get(handlers::weekly_services::current))
        .route("/:id", get(handlers::weekly_services::get))
        .merge(Router::new()
            .route("/", post(handlers::weekly_services::create))
            .route("/:id", put(handlers::weekly_services::update))
            .route("/:id", delete(handlers::weekly_services::delete))
            .route_layer(axum::middleware::from_fn_with_state(
                state,
                middleware::auth::require_admin,
            ))
        )
}

fn gallery_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::gallery::list))
        .route("/:id", get(handlers::gallery::get))
        .merge(Router::new()
            .route("/", post(handlers::gallery::create))
            .route("/:id", delete(handlers::gallery::delete))
            .route_layer(axum::middleware::from_fn_with_state(
                state,
                middleware::auth::require_admin,
            ))
        )
}

fn upload_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::uploads::upload_image))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_admin,
        ))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

fn admin_session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/session", get(handlers::auth::session))
}
