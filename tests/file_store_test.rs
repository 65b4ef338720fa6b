mod common;

use std::sync::Arc;

use yeram::{
    domain::GalleryCategory,
    error::AppError,
    repository::{ContentDocument, FileStore, Repositories},
};

use common::{announcement, photo, weekly_service};

fn file_repos(store: FileStore) -> Repositories {
    Repositories::from_store("file", Arc::new(store))
}

#[tokio::test]
async fn missing_data_file_is_created_with_sample_content() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("data.json");

    let repos = file_repos(FileStore::open(&path).await?);

    assert!(path.exists());
    assert_eq!(repos.gallery.list().await?.len(), 4);
    assert!(repos.announcements.current().await?.is_some());

    let doc: ContentDocument = serde_json::from_slice(&std::fs::read(&path)?)?;
    assert_eq!(doc.gallery_photos.len(), 4);
    assert_eq!(doc.current_id, 7);
    Ok(())
}

#[tokio::test]
async fn content_survives_reopening_the_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{}")?;

    let (announcements, photos, services) = {
        let repos = file_repos(FileStore::open(&path).await?);
        repos.announcements.create(announcement("Easter egg hunt")).await?;
        repos.gallery.create(photo("baptism", GalleryCategory::Worship)).await?;
        repos.weekly_services.create(weekly_service("Palm Sunday")).await?;
        repos.announcements.create(announcement("Choir practice")).await?;
        (
            repos.announcements.list().await?,
            repos.gallery.list().await?,
            repos.weekly_services.list().await?,
        )
    };

    let reopened = file_repos(FileStore::open(&path).await?);
    assert_eq!(reopened.announcements.list().await?, announcements);
    assert_eq!(reopened.gallery.list().await?, photos);
    assert_eq!(reopened.weekly_services.list().await?, services);

    // The shared id counter carries on from where it stopped.
    let next = reopened.gallery.create(photo("picnic", GalleryCategory::Fellowship)).await?;
    assert_eq!(next.id, 5);
    Ok(())
}

#[tokio::test]
async fn writes_leave_no_temporary_file_behind() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{}")?;

    let repos = file_repos(FileStore::open(&path).await?);
    let added = repos.announcements.create(announcement("Bulletin")).await?;
    repos.announcements.delete(added.id).await?;

    let names: Vec<String> = std::fs::read_dir(dir.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["data.json".to_string()]);

    let doc: ContentDocument = serde_json::from_slice(&std::fs::read(&path)?)?;
    assert!(doc.announcements.is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_lookups_do_not_touch_the_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{}")?;

    let repos = file_repos(FileStore::open(&path).await?);
    repos.announcements.create(announcement("Only one")).await?;
    let before = std::fs::read(&path)?;

    assert!(repos.announcements.update(99, announcement("ghost")).await?.is_none());
    assert!(!repos.gallery.delete(99).await?);

    assert_eq!(std::fs::read(&path)?, before);
    Ok(())
}

#[tokio::test]
async fn corrupt_data_file_is_an_error_and_is_left_alone() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{ not json")?;

    let err = FileStore::open(&path).await.err().expect("corrupt file must not open");
    assert!(matches!(err, AppError::Storage(_)));
    assert_eq!(std::fs::read_to_string(&path)?, "{ not json");
    Ok(())
}

#[tokio::test]
async fn read_reports_absent_file_as_none() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    assert!(FileStore::read(&dir.path().join("missing.json")).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn data_file_with_tmp_extension_is_persisted() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("content.tmp");
    std::fs::write(&path, "{}")?;

    let repos = file_repos(FileStore::open(&path).await?);
    repos.announcements.create(announcement("Scratch")).await?;

    let names: Vec<String> = std::fs::read_dir(dir.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["content.tmp".to_string()]);

    let reopened = file_repos(FileStore::open(&path).await?);
    assert_eq!(reopened.announcements.list().await?.len(), 1);
    Ok(())
}
