use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhoto {
    pub id: i64,
    pub url: String,
    pub alt: String,
    pub category: GalleryCategory,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    Worship,
    Fellowship,
    Youth,
    Events,
}

impl GalleryCategory {
    pub const ALL: [GalleryCategory; 4] = [
        GalleryCategory::Worship,
        GalleryCategory::Fellowship,
        GalleryCategory::Youth,
        GalleryCategory::Events,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryCategory::Worship => "worship",
            GalleryCategory::Fellowship => "fellowship",
            GalleryCategory::Youth => "youth",
            GalleryCategory::Events => "events",
        }
    }
}

impl fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GalleryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown gallery category: {}", s))
    }
}

/// Gallery listing filter as accepted on the query string.
///
/// An absent value and the literal `all` both select every photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(GalleryCategory),
}

impl CategoryFilter {
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(CategoryFilter::All),
            Some(other) => other.parse().map(CategoryFilter::Only),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewGalleryPhoto {
    #[validate(custom(function = "not_blank"))]
    pub url: String,
    #[validate(custom(function = "not_blank"))]
    pub alt: String,
    pub category: GalleryCategory,
}

impl GalleryPhoto {
    pub fn from_new(id: i64, data: NewGalleryPhoto, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url: data.url,
            alt: data.alt,
            category: data.category,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_filter_treats_all_and_absent_alike() {
        assert_eq!(CategoryFilter::parse(None), Ok(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse(Some("all")), Ok(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse(Some("youth")),
            Ok(CategoryFilter::Only(GalleryCategory::Youth))
        );
        assert!(CategoryFilter::parse(Some("picnic")).is_err());
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&GalleryCategory::Fellowship).unwrap();
        assert_eq!(json, "\"fellowship\"");
    }
}
