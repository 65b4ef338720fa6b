use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{Announcement, NewAnnouncement},
    error::Result,
    repository::AnnouncementRepository,
};

#[derive(FromRow)]
struct AnnouncementRow {
    id: i64,
    title: String,
    content: String,
    author: String,
    created_at: NaiveDateTime,
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        Announcement {
            id: row.id,
            title: row.title,
            content: row.content,
            author: row.author,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        }
    }
}

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn current(&self) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, content, author, created_at
            FROM announcements
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Announcement::from))
    }

    async fn list(&self) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, content, author, created_at
            FROM announcements
            ORDER BY created_at DESC, id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Announcement::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, content, author, created_at
            FROM announcements
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Announcement::from))
    }

    async fn create(&self, data: NewAnnouncement) -> Result<Announcement> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO announcements (title, content, author, created_at)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(&data.title)
        .bind(&data.content)
        .bind(&data.author)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Announcement::from_new(
            result.last_insert_rowid(),
            data,
            DateTime::from_naive_utc_and_offset(now, Utc),
        ))
    }

    async fn update(&self, id: i64, data: NewAnnouncement) -> Result<Option<Announcement>> {
        let result = sqlx::query(
            r#"
            UPDATE announcements
            SET title = ?, content = ?, author = ?
            WHERE id = ?
            "#
        )
        .bind(&data.title)
        .bind(&data.content)
        .bind(&data.author)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
