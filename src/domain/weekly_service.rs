use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyService {
    pub id: i64,
    pub title: String,
    pub sermon_title: String,
    pub scripture: String,
    pub youtube_url: String,
    /// Display string such as `2024.01.14`; never parsed.
    pub date: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewWeeklyService {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub sermon_title: String,
    #[validate(custom(function = "not_blank"))]
    pub scripture: String,
    #[validate(custom(function = "not_blank"))]
    pub youtube_url: String,
    #[validate(custom(function = "not_blank"))]
    pub date: String,
}

impl WeeklyService {
    pub fn from_new(id: i64, data: NewWeeklyService, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: data.title,
            sermon_title: data.sermon_title,
            scripture: data.scripture,
            youtube_url: data.youtube_url,
            date: data.date,
            created_at,
        }
    }

    pub fn replace_with(&self, data: NewWeeklyService) -> Self {
        Self::from_new(self.id, data, self.created_at)
    }
}
