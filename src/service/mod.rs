use std::sync::Arc;

use crate::auth::AdminAuth;
use crate::repository::*;

/// Everything a request handler needs, built once at startup and injected into the router.
pub struct ServiceContext {
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub gallery_repo: Arc<dyn GalleryRepository>,
    pub weekly_service_repo: Arc<dyn WeeklyServiceRepository>,
    pub admin_auth: Arc<AdminAuth>,
    pub storage_backend: &'static str,
}

impl ServiceContext {
    pub fn new(repositories: Repositories, admin_auth: Arc<AdminAuth>) -> Self {
        Self {
            announcement_repo: repositories.announcements,
            gallery_repo: repositories.gallery,
            weekly_service_repo: repositories.weekly_services,
            admin_auth,
            storage_backend: repositories.backend,
        }
    }
}
