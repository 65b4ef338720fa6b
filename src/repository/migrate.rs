//! Copies a content set into another backend, normally SQLite.
//!
//! Records are inserted as new rows, so they receive fresh ids and
//! timestamps. Running it twice duplicates the content.

use std::path::Path;

use tracing::info;

use crate::{
    domain::{NewAnnouncement, NewGalleryPhoto, NewWeeklyService},
    error::Result,
    repository::{connect_sqlite, ContentSet, FileStore, Repositories},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub announcements: usize,
    pub gallery_photos: usize,
    pub weekly_services: usize,
}

/// Inserts every record of `content` into `target`, oldest first so the
/// newest record stays the current one.
pub async fn migrate_content(content: &ContentSet, target: &Repositories) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();

    let announcements = content.announcements();
    info!("Migrating {} announcements", announcements.len());
    for announcement in announcements.into_iter().rev() {
        target.announcements.create(NewAnnouncement {
            title: announcement.title.clone(),
            content: announcement.content,
            author: announcement.author,
        }).await?;
        info!("  {}", announcement.title);
        report.announcements += 1;
    }

    let photos = content.gallery_photos();
    info!("Migrating {} gallery photos", photos.len());
    for photo in photos.into_iter().rev() {
        target.gallery.create(NewGalleryPhoto {
            url: photo.url,
            alt: photo.alt.clone(),
            category: photo.category,
        }).await?;
        info!("  {} ({})", photo.alt, photo.category);
        report.gallery_photos += 1;
    }

    let services = content.weekly_services();
    info!("Migrating {} weekly services", services.len());
    for service in services.into_iter().rev() {
        target.weekly_services.create(NewWeeklyService {
            title: service.title.clone(),
            sermon_title: service.sermon_title,
            scripture: service.scripture,
            youtube_url: service.youtube_url,
            date: service.date,
        }).await?;
        info!("  {}", service.title);
        report.weekly_services += 1;
    }

    Ok(report)
}

/// Copies a JSON data file into the database at `database_url`.
/// `None` when there is no data file; the database is not touched then.
pub async fn migrate_data_file(data_file: &Path, database_url: &str) -> Result<Option<MigrationReport>> {
    let Some(content) = FileStore::read(data_file).await? else {
        info!("No data file at {}; nothing to migrate", data_file.display());
        return Ok(None);
    };

    let pool = connect_sqlite(database_url, 1).await?;
    let report = migrate_content(&content, &Repositories::sqlite(pool.clone())).await?;
    pool.close().await;

    Ok(Some(report))
}
