use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::StorageBackend;
use crate::domain::*;
use crate::error::Result;

pub mod content_set;
pub mod memory_store;
pub mod file_store;
pub mod migrate;
pub mod announcement_repository;
pub mod gallery_repository;
pub mod weekly_service_repository;

pub use content_set::{ContentDocument, ContentSet};
pub use memory_store::MemoryStore;
pub use file_store::FileStore;
pub use migrate::{migrate_content, migrate_data_file, MigrationReport};
pub use announcement_repository::SqliteAnnouncementRepository;
pub use gallery_repository::SqliteGalleryRepository;
pub use weekly_service_repository::SqliteWeeklyServiceRepository;

/// Listings are newest-first; `current` is the newest record, if any.
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn current(&self) -> Result<Option<Announcement>>;
    async fn list(&self) -> Result<Vec<Announcement>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>>;
    async fn create(&self, data: NewAnnouncement) -> Result<Announcement>;
    /// Full replace; `None` when no record has this id.
    async fn update(&self, id: i64, data: NewAnnouncement) -> Result<Option<Announcement>>;
    /// `true` when a record was actually removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<GalleryPhoto>>;
    async fn list_by_category(&self, category: GalleryCategory) -> Result<Vec<GalleryPhoto>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<GalleryPhoto>>;
    async fn create(&self, data: NewGalleryPhoto) -> Result<GalleryPhoto>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait WeeklyServiceRepository: Send + Sync {
    async fn current(&self) -> Result<Option<WeeklyService>>;
    async fn list(&self) -> Result<Vec<WeeklyService>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<WeeklyService>>;
    async fn create(&self, data: NewWeeklyService) -> Result<WeeklyService>;
    async fn update(&self, id: i64, data: NewWeeklyService) -> Result<Option<WeeklyService>>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// One storage backend seen through the three entity repositories.
#[derive(Clone)]
pub struct Repositories {
    pub backend: &'static str,
    pub announcements: Arc<dyn AnnouncementRepository>,
    pub gallery: Arc<dyn GalleryRepository>,
    pub weekly_services: Arc<dyn WeeklyServiceRepository>,
}

impl Repositories {
    /// Shares a single store that implements every repository.
    pub fn from_store<S>(backend: &'static str, store: Arc<S>) -> Self
    where
        S: AnnouncementRepository + GalleryRepository + WeeklyServiceRepository + 'static,
    {
        Self {
            backend,
            announcements: store.clone(),
            gallery: store.clone(),
            weekly_services: store,
        }
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        Self {
            backend: "sqlite",
            announcements: Arc::new(SqliteAnnouncementRepository::new(pool.clone())),
            gallery: Arc::new(SqliteGalleryRepository::new(pool.clone())),
            weekly_services: Arc::new(SqliteWeeklyServiceRepository::new(pool)),
        }
    }

    pub fn memory(store: MemoryStore) -> Self {
        Self::from_store("memory", Arc::new(store))
    }

    pub async fn open(backend: &StorageBackend, max_connections: u32) -> Result<Self> {
        match backend {
            StorageBackend::Sqlite { url } => {
                let pool = connect_sqlite(url, max_connections).await?;
                Ok(Self::sqlite(pool))
            }
            StorageBackend::Memory => Ok(Self::memory(MemoryStore::seeded())),
            StorageBackend::File { path } => {
                let store = FileStore::open(path).await?;
                Ok(Self::from_store("file", Arc::new(store)))
            }
        }
    }
}

/// Connects to SQLite, creating the database file if needed, and applies migrations.
pub async fn connect_sqlite(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await?;

    Ok(pool)
}
