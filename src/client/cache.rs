use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

/// Response cache keyed by request path plus query string.
#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}?{}", path, q),
            _ => path.to_string(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn insert(&self, key: String, value: Value) {
        self.entries.write().await.insert(key, value);
    }

    /// Drops the entry for `prefix` itself and every entry below it
    /// (`prefix/...` or `prefix?...`). Returns how many were removed.
    pub async fn invalidate(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !covers(prefix, key));
        before - entries.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn covers(prefix: &str, key: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_includes_query() {
        assert_eq!(QueryCache::key("/api/gallery", None), "/api/gallery");
        assert_eq!(QueryCache::key("/api/gallery", Some("")), "/api/gallery");
        assert_eq!(
            QueryCache::key("/api/gallery", Some("category=youth")),
            "/api/gallery?category=youth"
        );
    }

    #[tokio::test]
    async fn invalidate_drops_only_the_resource_tree() {
        let cache = QueryCache::new();
        for key in [
            "/api/gallery",
            "/api/gallery?category=youth",
            "/api/gallery/3",
            "/api/gallery-archive",
            "/api/announcements",
        ] {
            cache.insert(key.to_string(), json!([])).await;
        }

        assert_eq!(cache.invalidate("/api/gallery").await, 3);
        assert!(cache.get("/api/gallery-archive").await.is_some());
        assert!(cache.get("/api/announcements").await.is_some());
        assert_eq!(cache.len().await, 2);
    }
}
