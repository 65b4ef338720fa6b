use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{GalleryCategory, GalleryPhoto, NewGalleryPhoto},
    error::{AppError, Result},
    repository::GalleryRepository,
};

#[derive(FromRow)]
struct GalleryPhotoRow {
    id: i64,
    url: String,
    alt: String,
    category: String,
    created_at: NaiveDateTime,
}

pub struct SqliteGalleryRepository {
    pool: SqlitePool,
}

impl SqliteGalleryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_photo(row: GalleryPhotoRow) -> Result<GalleryPhoto> {
        Ok(GalleryPhoto {
            id: row.id,
            url: row.url,
            alt: row.alt,
            category: row.category.parse().map_err(AppError::Database)?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl GalleryRepository for SqliteGalleryRepository {
    async fn list(&self) -> Result<Vec<GalleryPhoto>> {
        let rows = sqlx::query_as::<_, GalleryPhotoRow>(
            r#"
            SELECT id, url, alt, category, created_at
            FROM gallery_photos
            ORDER BY created_at DESC, id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_photo)
            .collect()
    }

    async fn list_by_category(&self, category: GalleryCategory) -> Result<Vec<GalleryPhoto>> {
        let rows = sqlx::query_as::<_, GalleryPhotoRow>(
            r#"
            SELECT id, url, alt, category, created_at
            FROM gallery_photos
            WHERE category = ?
            ORDER BY created_at DESC, id DESC
            "#
        )
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_photo)
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GalleryPhoto>> {
        let row = sqlx::query_as::<_, GalleryPhotoRow>(
            r#"
            SELECT id, url, alt, category, created_at
            FROM gallery_photos
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_photo).transpose()
    }

    async fn create(&self, data: NewGalleryPhoto) -> Result<GalleryPhoto> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO gallery_photos (url, alt, category, created_at)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(&data.url)
        .bind(&data.alt)
        .bind(data.category.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(GalleryPhoto::from_new(
            result.last_insert_rowid(),
            data,
            DateTime::from_naive_utc_and_offset(now, Utc),
        ))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM gallery_photos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
