//! In-process content store. Nothing survives a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::*,
    error::Result,
    repository::{
        content_set::ContentSet, AnnouncementRepository, GalleryRepository,
        WeeklyServiceRepository,
    },
};

pub struct MemoryStore {
    content: RwLock<ContentSet>,
}

impl MemoryStore {
    /// An empty store; the first record gets id 1.
    pub fn new() -> Self {
        Self::with_content(ContentSet::new())
    }

    /// A store preloaded with the sample announcement, service and photos.
    pub fn seeded() -> Self {
        Self::with_content(ContentSet::seeded())
    }

    pub fn with_content(content: ContentSet) -> Self {
        Self {
            content: RwLock::new(content),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnnouncementRepository for MemoryStore {
    async fn current(&self) -> Result<Option<Announcement>> {
        Ok(self.content.read().await.current_announcement())
    }

    async fn list(&self) -> Result<Vec<Announcement>> {
        Ok(self.content.read().await.announcements())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>> {
        Ok(self.content.read().await.announcement(id))
    }

    async fn create(&self, data: NewAnnouncement) -> Result<Announcement> {
        Ok(self.content.write().await.add_announcement(data))
    }

    async fn update(&self, id: i64, data: NewAnnouncement) -> Result<Option<Announcement>> {
        Ok(self.content.write().await.update_announcement(id, data))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.content.write().await.delete_announcement(id))
    }
}

#[async_trait]
impl GalleryRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<GalleryPhoto>> {
        Ok(self.content.read().await.gallery_photos())
    }

    async fn list_by_category(&self, category: GalleryCategory) -> Result<Vec<GalleryPhoto>> {
        Ok(self.content.read().await.gallery_photos_in(category))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GalleryPhoto>> {
        Ok(self.content.read().await.gallery_photo(id))
    }

    async fn create(&self, data: NewGalleryPhoto) -> Result<GalleryPhoto> {
        Ok(self.content.write().await.add_gallery_photo(data))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.content.write().await.delete_gallery_photo(id))
    }
}

#[async_trait]
impl WeeklyServiceRepository for MemoryStore {
    async fn current(&self) -> Result<Option<WeeklyService>> {
        Ok(self.content.read().await.current_weekly_service())
    }

    async fn list(&self) -> Result<Vec<WeeklyService>> {
        Ok(self.content.read().await.weekly_services())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<WeeklyService>> {
        Ok(self.content.read().await.weekly_service(id))
    }

    async fn create(&self, data: NewWeeklyService) -> Result<WeeklyService> {
        Ok(self.content.write().await.add_weekly_service(data))
    }

    async fn update(&self, id: i64, data: NewWeeklyService) -> Result<Option<WeeklyService>> {
        Ok(self.content.write().await.update_weekly_service(id, data))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.content.write().await.delete_weekly_service(id))
    }
}
