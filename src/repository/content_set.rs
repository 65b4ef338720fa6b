//! The in-process content model shared by the memory and file backends.
//!
//! A single id counter covers all three entity types, so ids are unique
//! across the whole set and only ever grow.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::*;

/// Records that take part in newest-first ordering.
trait Timeline: Clone {
    fn id(&self) -> i64;
    fn created_at(&self) -> DateTime<Utc>;

    fn recency(&self) -> (DateTime<Utc>, i64) {
        (self.created_at(), self.id())
    }
}

impl Timeline for Announcement {
    fn id(&self) -> i64 {
        self.id
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Timeline for GalleryPhoto {
    fn id(&self) -> i64 {
        self.id
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Timeline for WeeklyService {
    fn id(&self) -> i64 {
        self.id
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Newest first; equal timestamps fall back to insertion order (higher id first).
fn newest_first<'a, T: Timeline + 'a>(records: impl Iterator<Item = &'a T>) -> Vec<T> {
    let mut out: Vec<T> = records.cloned().collect();
    out.sort_by(|a, b| b.recency().cmp(&a.recency()));
    out
}

fn most_recent<'a, T: Timeline + 'a>(records: impl Iterator<Item = &'a T>) -> Option<T> {
    records.max_by_key(|r| r.recency()).cloned()
}

#[derive(Debug, Clone)]
pub struct ContentSet {
    announcements: BTreeMap<i64, Announcement>,
    gallery_photos: BTreeMap<i64, GalleryPhoto>,
    weekly_services: BTreeMap<i64, WeeklyService>,
    next_id: i64,
}

/// On-disk layout of a content set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub gallery_photos: Vec<GalleryPhoto>,
    #[serde(default)]
    pub weekly_services: Vec<WeeklyService>,
    #[serde(default)]
    pub current_id: i64,
}

impl Default for ContentSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSet {
    pub fn new() -> Self {
        Self {
            announcements: BTreeMap::new(),
            gallery_photos: BTreeMap::new(),
            weekly_services: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// A set preloaded with one announcement, one weekly service and a photo per category.
    pub fn seeded() -> Self {
        let mut set = Self::new();

        set.add_announcement(NewAnnouncement {
            title: "New Year Dawn Prayer Week".to_string(),
            content: "Dear church family, we are holding a special dawn prayer week to open the new year.\n\n\
                      - Dates: Monday January 15 to Friday January 19\n\
                      - Time: 5:30 to 6:30 AM every morning\n\
                      - Place: Main sanctuary\n\
                      - Theme: \"A new year, a new vision\"\n\n\
                      Everyone is welcome to join."
                .to_string(),
            author: "Senior Pastor".to_string(),
        });

        set.add_weekly_service(NewWeeklyService {
            title: "Sunday Worship, Second Week of January".to_string(),
            sermon_title: "A New Beginning".to_string(),
            scripture: "Matthew 5:13-16".to_string(),
            youtube_url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            date: "2024.01.14".to_string(),
        });

        let photos = [
            ("photo-1438232992991-995b7058bbb3", "Sunday worship", GalleryCategory::Worship),
            ("photo-1609220136736-443140cffec6", "Fellowship lunch", GalleryCategory::Fellowship),
            ("photo-1529156069898-49953e39b3ac", "Youth group retreat", GalleryCategory::Youth),
            ("photo-1511578314322-379afb476865", "Church picnic", GalleryCategory::Events),
        ];
        for (image, alt, category) in photos {
            set.add_gallery_photo(NewGalleryPhoto {
                url: format!("https://images.unsplash.com/{}?auto=format&fit=crop&w=800&h=800", image),
                alt: alt.to_string(),
                category,
            });
        }

        set
    }

    pub fn from_document(doc: ContentDocument) -> Self {
        let announcements: BTreeMap<_, _> =
            doc.announcements.into_iter().map(|a| (a.id, a)).collect();
        let gallery_photos: BTreeMap<_, _> =
            doc.gallery_photos.into_iter().map(|p| (p.id, p)).collect();
        let weekly_services: BTreeMap<_, _> =
            doc.weekly_services.into_iter().map(|s| (s.id, s)).collect();

        let max_id = announcements
            .keys()
            .chain(gallery_photos.keys())
            .chain(weekly_services.keys())
            .copied()
            .max()
            .unwrap_or(0);

        Self {
            announcements,
            gallery_photos,
            weekly_services,
            next_id: doc.current_id.max(max_id + 1).max(1),
        }
    }

    pub fn to_document(&self) -> ContentDocument {
        ContentDocument {
            announcements: self.announcements.values().cloned().collect(),
            gallery_photos: self.gallery_photos.values().cloned().collect(),
            weekly_services: self.weekly_services.values().cloned().collect(),
            current_id: self.next_id,
        }
    }

    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    fn allocate(&mut self) -> (i64, DateTime<Utc>) {
        let id = self.next_id;
        self.next_id += 1;
        (id, Utc::now())
    }

    // Announcements

    pub fn current_announcement(&self) -> Option<Announcement> {
        most_recent(self.announcements.values())
    }

    pub fn announcements(&self) -> Vec<Announcement> {
        newest_first(self.announcements.values())
    }

    pub fn announcement(&self, id: i64) -> Option<Announcement> {
        self.announcements.get(&id).cloned()
    }

    pub fn add_announcement(&mut self, data: NewAnnouncement) -> Announcement {
        let (id, now) = self.allocate();
        let announcement = Announcement::from_new(id, data, now);
        self.announcements.insert(id, announcement.clone());
        announcement
    }

    pub fn update_announcement(&mut self, id: i64, data: NewAnnouncement) -> Option<Announcement> {
        let slot = self.announcements.get_mut(&id)?;
        *slot = slot.replace_with(data);
        Some(slot.clone())
    }

    pub fn delete_announcement(&mut self, id: i64) -> bool {
        self.announcements.remove(&id).is_some()
    }

    // Gallery

    pub fn gallery_photos(&self) -> Vec<GalleryPhoto> {
        newest_first(self.gallery_photos.values())
    }

    pub fn gallery_photos_in(&self, category: GalleryCategory) -> Vec<GalleryPhoto> {
        newest_first(self.gallery_photos.values().filter(|p| p.category == category))
    }

    pub fn gallery_photo(&self, id: i64) -> Option<GalleryPhoto> {
        self.gallery_photos.get(&id).cloned()
    }

    pub fn add_gallery_photo(&mut self, data: NewGalleryPhoto) -> GalleryPhoto {
        let (id, now) = self.allocate();
        let photo = GalleryPhoto::from_new(id, data, now);
        self.gallery_photos.insert(id, photo.clone());
        photo
    }

    pub fn delete_gallery_photo(&mut self, id: i64) -> bool {
        self.gallery_photos.remove(&id).is_some()
    }

    // Weekly services

    pub fn current_weekly_service(&self) -> Option<WeeklyService> {
        most_recent(self.weekly_services.values())
    }

    pub fn weekly_services(&self) -> Vec<WeeklyService> {
        newest_first(self.weekly_services.values())
    }

    pub fn weekly_service(&self, id: i64) -> Option<WeeklyService> {
        self.weekly_services.get(&id).cloned()
    }

    pub fn add_weekly_service(&mut self, data: NewWeeklyService) -> WeeklyService {
        let (id, now) = self.allocate();
        let service = WeeklyService::from_new(id, data, now);
        self.weekly_services.insert(id, service.clone());
        service
    }

    pub fn update_weekly_service(&mut self, id: i64, data: NewWeeklyService) -> Option<WeeklyService> {
        let slot = self.weekly_services.get_mut(&id)?;
        *slot = slot.replace_with(data);
        Some(slot.clone())
    }

    pub fn delete_weekly_service(&mut self, id: i64) -> bool {
        self.weekly_services.remove(&id).is_some()
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.announcements.len(),
            self.gallery_photos.len(),
            self.weekly_services.len(),
        )
    }
}
