use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{NewWeeklyService, WeeklyService},
    error::Result,
    repository::WeeklyServiceRepository,
};

#[derive(FromRow)]
struct WeeklyServiceRow {
    id: i64,
    title: String,
    sermon_title: String,
    scripture: String,
    youtube_url: String,
    date: String,
    created_at: NaiveDateTime,
}

impl From<WeeklyServiceRow> for WeeklyService {
    fn from(row: WeeklyServiceRow) -> Self {
        WeeklyService {
            id: row.id,
            title: row.title,
            sermon_title: row.sermon_title,
            scripture: row.scripture,
            youtube_url: row.youtube_url,
            date: row.date,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        }
    }
}

pub struct SqliteWeeklyServiceRepository {
    pool: SqlitePool,
}

impl SqliteWeeklyServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WeeklyServiceRepository for SqliteWeeklyServiceRepository {
    async fn current(&self) -> Result<Option<WeeklyService>> {
        let row = sqlx::query_as::<_, WeeklyServiceRow>(
            r#"
            SELECT id, title, sermon_title, scripture, youtube_url, date, created_at
            FROM weekly_services
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WeeklyService::from))
    }

    async fn list(&self) -> Result<Vec<WeeklyService>> {
        let rows = sqlx::query_as::<_, WeeklyServiceRow>(
            r#"
            SELECT id, title, sermon_title, scripture, youtube_url, date, created_at
            FROM weekly_services
            ORDER BY created_at DESC, id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WeeklyService::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<WeeklyService>> {
        let row = sqlx::query_as::<_, WeeklyServiceRow>(
            r#"
            SELECT id, title, sermon_title, scripture, youtube_url, date, created_at
            FROM weekly_services
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WeeklyService::from))
    }

    async fn create(&self, data: NewWeeklyService) -> Result<WeeklyService> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO weekly_services (
                title, sermon_title, scripture, youtube_url, date, created_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&data.title)
        .bind(&data.sermon_title)
        .bind(&data.scripture)
        .bind(&data.youtube_url)
        .bind(&data.date)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(WeeklyService::from_new(
            result.last_insert_rowid(),
            data,
            DateTime::from_naive_utc_and_offset(now, Utc),
        ))
    }

    async fn update(&self, id: i64, data: NewWeeklyService) -> Result<Option<WeeklyService>> {
        let result = sqlx::query(
            r#"
            UPDATE weekly_services
            SET title = ?, sermon_title = ?, scripture = ?, youtube_url = ?, date = ?
            WHERE id = ?
            "#
        )
        .bind(&data.title)
        .bind(&data.sermon_title)
        .bind(&data.scripture)
        .bind(&data.youtube_url)
        .bind(&data.date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM weekly_services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
