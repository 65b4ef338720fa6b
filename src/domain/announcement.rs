use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Body of an announcement create or full replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    #[validate(custom(function = "not_blank"))]
    pub author: String,
}

impl Announcement {
    pub fn from_new(id: i64, data: NewAnnouncement, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: data.title,
            content: data.content,
            author: data.author,
            created_at,
        }
    }

    /// Replaces every field except `id` and `created_at`.
    pub fn replace_with(&self, data: NewAnnouncement) -> Self {
        Self::from_new(self.id, data, self.created_at)
    }
}
