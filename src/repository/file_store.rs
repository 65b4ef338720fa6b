//! JSON-file content store.
//!
//! The whole content set is kept in memory and the file is rewritten after
//! every mutation that changed something. Writes go to a temporary file in
//! the same directory and are renamed into place, so a crash mid-write
//! leaves the previous document intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    domain::*,
    error::{AppError, Result},
    repository::{
        content_set::{ContentDocument, ContentSet}, AnnouncementRepository, GalleryRepository,
        WeeklyServiceRepository,
    },
};

pub struct FileStore {
    path: PathBuf,
    // Held across mutate-and-persist so concurrent writers cannot interleave.
    content: Mutex<ContentSet>,
}

impl FileStore {
    /// Opens the data file, creating it with the sample content if it does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let content = match Self::read(&path).await? {
            Some(content) => {
                let (announcements, photos, services) = content.counts();
                info!(
                    path = %path.display(),
                    announcements, photos, services,
                    "loaded content from data file"
                );
                content
            }
            None => {
                warn!(path = %path.display(), "data file not found, writing sample content");
                let content = ContentSet::seeded();
                write_atomic(&path, &content.to_document()).await?;
                content
            }
        };

        Ok(Self {
            path,
            content: Mutex::new(content),
        })
    }

    /// Reads a data file without taking ownership of it. `None` when the file is absent.
    pub async fn read(path: &Path) -> Result<Option<ContentSet>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let doc: ContentDocument = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Storage(format!("Corrupt data file {}: {}", path.display(), e))
        })?;

        Ok(Some(ContentSet::from_document(doc)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn view<T>(&self, f: impl FnOnce(&ContentSet) -> T) -> T {
        let guard = self.content.lock().await;
        f(&*guard)
    }

    /// Applies `op` to a copy of the content, persists the copy when `op`
    /// reports a change, and only then makes it visible.
    async fn mutate<T>(&self, op: impl FnOnce(&mut ContentSet) -> (T, bool)) -> Result<T> {
        let mut guard = self.content.lock().await;
        let mut next = guard.clone();
        let (out, changed) = op(&mut next);

        if changed {
            write_atomic(&self.path, &next.to_document()).await?;
            *guard = next;
        }

        Ok(out)
    }
}

/// Sibling of `path` with `.tmp` appended to the full file name.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_atomic(path: &Path, doc: &ContentDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_vec_pretty(doc)?;
    let tmp_path = temp_path(path);
    {
        let mut file = tokio::fs::File::create(&tmp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
    }
    tokio::fs::rename(&tmp_path, path).await?;

    debug!(
        path = %path.display(),
        announcements = doc.announcements.len(),
        photos = doc.gallery_photos.len(),
        services = doc.weekly_services.len(),
        "saved data file"
    );
    Ok(())
}

#[async_trait]
impl AnnouncementRepository for FileStore {
    async fn current(&self) -> Result<Option<Announcement>> {
        Ok(self.view(|c| c.current_announcement()).await)
    }

    async fn list(&self) -> Result<Vec<Announcement>> {
        Ok(self.view(|c| c.announcements()).await)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>> {
        Ok(self.view(|c| c.announcement(id)).await)
    }

    async fn create(&self, data: NewAnnouncement) -> Result<Announcement> {
        self.mutate(|c| (c.add_announcement(data), true)).await
    }

    async fn update(&self, id: i64, data: NewAnnouncement) -> Result<Option<Announcement>> {
        self.mutate(|c| {
            let updated = c.update_announcement(id, data);
            let changed = updated.is_some();
            (updated, changed)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.mutate(|c| {
            let removed = c.delete_announcement(id);
            (removed, removed)
        })
        .await
    }
}

#[async_trait]
impl GalleryRepository for FileStore {
    async fn list(&self) -> Result<Vec<GalleryPhoto>> {
        Ok(self.view(|c| c.gallery_photos()).await)
    }

    async fn list_by_category(&self, category: GalleryCategory) -> Result<Vec<GalleryPhoto>> {
        Ok(self.view(|c| c.gallery_photos_in(category)).await)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GalleryPhoto>> {
        Ok(self.view(|c| c.gallery_photo(id)).await)
    }

    async fn create(&self, data: NewGalleryPhoto) -> Result<GalleryPhoto> {
        self.mutate(|c| (c.add_gallery_photo(data), true)).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.mutate(|c| {
            let removed = c.delete_gallery_photo(id);
            (removed, removed)
        })
        .await
    }
}

#[async_trait]
impl WeeklyServiceRepository for FileStore {
    async fn current(&self) -> Result<Option<WeeklyService>> {
        Ok(self.view(|c| c.current_weekly_service()).await)
    }

    async fn list(&self) -> Result<Vec<WeeklyService>> {
        Ok(self.view(|c| c.weekly_services()).await)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<WeeklyService>> {
        Ok(self.view(|c| c.weekly_service(id)).await)
    }

    async fn create(&self, data: NewWeeklyService) -> Result<WeeklyService> {
        self.mutate(|c| (c.add_weekly_service(data), true)).await
    }

    async fn update(&self, id: i64, data: NewWeeklyService) -> Result<Option<WeeklyService>> {
        self.mutate(|c| {
            let updated = c.update_weekly_service(id, data);
            let changed = updated.is_some();
            (updated, changed)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.mutate(|c| {
            let removed = c.delete_weekly_service(id);
            (removed, removed)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_never_equals_the_data_file() {
        assert_eq!(temp_path(Path::new("/srv/data.json")), PathBuf::from("/srv/data.json.tmp"));
        assert_eq!(temp_path(Path::new("backup.tmp")), PathBuf::from("backup.tmp.tmp"));
        assert_ne!(temp_path(Path::new("backup.tmp")), PathBuf::from("backup.tmp"));
    }
}
