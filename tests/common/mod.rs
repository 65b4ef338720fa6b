#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use yeram::{
    api,
    auth::AdminAuth,
    config::Settings,
    domain::{GalleryCategory, NewAnnouncement, NewGalleryPhoto, NewWeeklyService},
    repository::Repositories,
    service::ServiceContext,
};

pub const ADMIN_PASSWORD: &str = "test-password";
pub const BASE_URL: &str = "https://church.example";

pub fn test_settings(uploads_dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.server.base_url = BASE_URL.to_string();
    settings.server.uploads_dir = uploads_dir.to_string_lossy().into_owned();
    settings.admin.password = ADMIN_PASSWORD.to_string();
    settings
}

pub fn build_app(repositories: Repositories, settings: Settings) -> (Router, Arc<ServiceContext>) {
    let admin_auth = Arc::new(AdminAuth::new(
        settings.admin.password.clone(),
        settings.admin.session_hours,
    ));
    let context = Arc::new(ServiceContext::new(repositories, admin_auth));
    let app = api::create_app(context.clone(), Arc::new(settings));
    (app, context)
}

pub fn announcement(title: &str) -> NewAnnouncement {
    NewAnnouncement {
        title: title.to_string(),
        content: format!("{} content", title),
        author: "Church Office".to_string(),
    }
}

pub fn weekly_service(title: &str) -> NewWeeklyService {
    NewWeeklyService {
        title: title.to_string(),
        sermon_title: format!("{} sermon", title),
        scripture: "Psalm 23".to_string(),
        youtube_url: "https://www.youtube.com/embed/abc123".to_string(),
        date: "2024.02.04".to_string(),
    }
}

pub fn photo(alt: &str, category: GalleryCategory) -> NewGalleryPhoto {
    NewGalleryPhoto {
        url: format!("https://images.example.com/{}.jpg", alt.replace(' ', "-")),
        alt: alt.to_string(),
        category,
    }
}
