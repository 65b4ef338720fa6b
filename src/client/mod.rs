//! Typed HTTP client for the content API.
//!
//! Reads go through a [`QueryCache`]; a successful mutation invalidates
//! every cached entry under the mutated resource so the next read refetches.
//! Failures are returned as-is, there is no retry.

pub mod cache;

pub use cache::QueryCache;

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::*;

const ANNOUNCEMENTS: &str = "/api/announcements";
const GALLERY: &str = "/api/gallery";
const WEEKLY_SERVICES: &str = "/api/weekly-services";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            ClientError::Decode(_) => None,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Deserialize)]
struct UrlBody {
    url: String,
}

pub struct SiteClient {
    http: reqwest::Client,
    base_url: String,
    cache: QueryCache,
    token: RwLock<Option<String>>,
}

impl SiteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: QueryCache::new(),
            token: RwLock::new(None),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // Admin session

    pub async fn login(&self, password: &str) -> ClientResult<()> {
        let response = self
            .request(Method::POST, "/api/admin/login")
            .await
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;
        let body: TokenBody = read_json(response).await?;

        *self.token.write().await = Some(body.token);
        Ok(())
    }

    pub async fn logout(&self) -> ClientResult<()> {
        let response = self.request(Method::POST, "/api/admin/logout").await.send().await?;
        ensure_success(response).await?;

        *self.token.write().await = None;
        Ok(())
    }

    pub async fn is_logged_in(&self) -> bool {
        self.token.read().await.is_some()
    }

    // Announcements

    pub async fn current_announcement(&self) -> ClientResult<Option<Announcement>> {
        self.query(&format!("{}/current", ANNOUNCEMENTS), None).await
    }

    pub async fn announcements(&self) -> ClientResult<Vec<Announcement>> {
        self.query(ANNOUNCEMENTS, None).await
    }

    pub async fn create_announcement(&self, data: &NewAnnouncement) -> ClientResult<Announcement> {
        self.mutate(Method::POST, ANNOUNCEMENTS.to_string(), data, ANNOUNCEMENTS).await
    }

    pub async fn update_announcement(&self, id: i64, data: &NewAnnouncement) -> ClientResult<Announcement> {
        self.mutate(Method::PUT, format!("{}/{}", ANNOUNCEMENTS, id), data, ANNOUNCEMENTS).await
    }

    pub async fn delete_announcement(&self, id: i64) -> ClientResult<()> {
        self.remove(format!("{}/{}", ANNOUNCEMENTS, id), ANNOUNCEMENTS).await
    }

    // Gallery

    pub async fn gallery(&self, category: Option<GalleryCategory>) -> ClientResult<Vec<GalleryPhoto>> {
        let query = category.map(|c| format!("category={}", c.as_str()));
        self.query(GALLERY, query.as_deref()).await
    }

    pub async fn add_gallery_photo(&self, data: &NewGalleryPhoto) -> ClientResult<GalleryPhoto> {
        self.mutate(Method::POST, GALLERY.to_string(), data, GALLERY).await
    }

    pub async fn delete_gallery_photo(&self, id: i64) -> ClientResult<()> {
        self.remove(format!("{}/{}", GALLERY, id), GALLERY).await
    }

    // Weekly services

    pub async fn current_weekly_service(&self) -> ClientResult<Option<WeeklyService>> {
        self.query(&format!("{}/current", WEEKLY_SERVICES), None).await
    }

    pub async fn weekly_services(&self) -> ClientResult<Vec<WeeklyService>> {
        self.query(WEEKLY_SERVICES, None).await
    }

    pub async fn create_weekly_service(&self, data: &NewWeeklyService) -> ClientResult<WeeklyService> {
        self.mutate(Method::POST, WEEKLY_SERVICES.to_string(), data, WEEKLY_SERVICES).await
    }

    pub async fn update_weekly_service(&self, id: i64, data: &NewWeeklyService) -> ClientResult<WeeklyService> {
        self.mutate(Method::PUT, format!("{}/{}", WEEKLY_SERVICES, id), data, WEEKLY_SERVICES).await
    }

    pub async fn delete_weekly_service(&self, id: i64) -> ClientResult<()> {
        self.remove(format!("{}/{}", WEEKLY_SERVICES, id), WEEKLY_SERVICES).await
    }

    // Uploads

    /// Uploads an image and returns the URL path it is served from.
    pub async fn upload_image(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> ClientResult<String> {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .request(Method::POST, "/api/upload")
            .await
            .multipart(form)
            .send()
            .await?;
        let body: UrlBody = read_json(response).await?;

        Ok(body.url)
    }

    // Plumbing

    async fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.token.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn query<T: DeserializeOwned>(&self, path: &str, query: Option<&str>) -> ClientResult<T> {
        let key = QueryCache::key(path, query);

        if let Some(hit) = self.cache.get(&key).await {
            tracing::trace!(%key, "query cache hit");
            return Ok(serde_json::from_value(hit)?);
        }

        let response = self.request(Method::GET, &key).await.send().await?;
        let value: Value = read_json(response).await?;
        let decoded = serde_json::from_value(value.clone())?;

        self.cache.insert(key, value).await;
        Ok(decoded)
    }

    async fn mutate<B, T>(
        &self,
        method: Method,
        path: String,
        body: &B,
        invalidates: &str,
    ) -> ClientResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.request(method, &path).await.json(body).send().await?;

        let result = read_json(response).await?;
        self.cache.invalidate(invalidates).await;
        Ok(result)
    }

    async fn remove(&self, path: String, invalidates: &str) -> ClientResult<()> {
        let response = self.request(Method::DELETE, &path).await.send().await?;
        ensure_success(response).await?;

        self.cache.invalidate(invalidates).await;
        Ok(())
    }
}

async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);

    Err(ClientError::Api { status, message })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
