use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// URL prefix under which stored uploads are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

/// Allowed image extensions
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Maximum file size (10 MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Save an uploaded image to the uploads directory under a fresh random name.
/// Returns the URL path to the file (e.g., "/uploads/abc123.jpg")
pub async fn save_uploaded_file(
    uploads_dir: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Result<String> {
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
    }

    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::PayloadTooLarge("File too large (max 10 MB)".to_string()));
    }

    if !content_type.starts_with("image/") {
        return Err(AppError::BadRequest("Only image files can be uploaded".to_string()));
    }

    // Extract and validate extension
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .ok_or_else(|| AppError::BadRequest("Invalid filename".to_string()))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Invalid file type. Allowed: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    // Ensure uploads directory exists
    let uploads_path = PathBuf::from(uploads_dir);
    fs::create_dir_all(&uploads_path).await.map_err(|e| {
        AppError::Internal(format!("Failed to create uploads directory: {}", e))
    })?;

    let new_filename = format!("{}.{}", Uuid::new_v4(), extension);
    let file_path = uploads_path.join(&new_filename);

    let mut file = fs::File::create(&file_path).await.map_err(|e| {
        AppError::Internal(format!("Failed to create file: {}", e))
    })?;

    file.write_all(data).await.map_err(|e| {
        AppError::Internal(format!("Failed to write file: {}", e))
    })?;

    tracing::info!(path = %file_path.display(), size = data.len(), "stored upload");

    Ok(format!("{}{}", UPLOADS_URL_PREFIX, new_filename))
}

/// Delete an uploaded file by its URL path (e.g., "/uploads/abc123.jpg").
/// URLs that do not point into the uploads directory are ignored.
pub async fn delete_uploaded_file(uploads_dir: &str, url_path: &str) -> Result<()> {
    let Some(name) = url_path.strip_prefix(UPLOADS_URL_PREFIX) else {
        return Ok(());
    };

    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return Ok(());
    }

    let path = PathBuf::from(uploads_dir).join(name);
    match fs::remove_file(&path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::Internal(format!("Failed to delete file: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_image_under_random_name() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        let url = save_uploaded_file(dir_str, "Photo.JPG", "image/jpeg", b"jpeg-bytes")
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".jpg"));
        let stored = dir.path().join(url.trim_start_matches("/uploads/"));
        assert_eq!(std::fs::read(stored).unwrap(), b"jpeg-bytes");
    }

    #[tokio::test]
    async fn rejects_non_image_content() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        let err = save_uploaded_file(dir_str, "notes.png", "text/plain", b"hello")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = save_uploaded_file(dir_str, "script.sh", "image/png", b"#!/bin/sh")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn rejects_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = vec![0u8; MAX_FILE_SIZE + 1];

        let err = save_uploaded_file(dir.path().to_str().unwrap(), "big.png", "image/png", &data)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[tokio::test]
    async fn delete_ignores_foreign_urls() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("keep.png");
        std::fs::write(&outside, b"x").unwrap();
        let uploads = dir.path().join("uploads");
        std::fs::create_dir_all(&uploads).unwrap();

        let uploads_str = uploads.to_str().unwrap();
        delete_uploaded_file(uploads_str, "https://images.example.com/keep.png").await.unwrap();
        delete_uploaded_file(uploads_str, "/uploads/../keep.png").await.unwrap();
        assert!(outside.exists());
    }
}
