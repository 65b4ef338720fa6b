//! Server-side admin sessions.
//!
//! The site has a single shared admin password. A correct password yields a
//! random token; only its SHA-256 hash is kept, together with an expiry.
//! Sessions live in memory and end with the process.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use cookie::{Cookie, SameSite};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

pub const SESSION_COOKIE: &str = "admin_session";

pub struct AdminAuth {
    password: String,
    session_hours: i64,
    sessions: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl AdminAuth {
    pub fn new(password: impl Into<String>, session_hours: i64) -> Self {
        Self {
            password: password.into(),
            session_hours,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn password_matches(&self, candidate: &str) -> bool {
        self.password.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    /// Starts a session when `password` matches. Returns the raw token.
    pub async fn login(&self, password: &str) -> Option<String> {
        if !self.password_matches(password) {
            tracing::warn!("Rejected admin login attempt");
            return None;
        }

        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(self.session_hours);

        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        sessions.retain(|_, expiry| *expiry > now);
        sessions.insert(hash_token(&token), expires_at);

        tracing::info!("Admin session started");
        Some(token)
    }

    pub async fn validate(&self, token: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions
            .get(&hash_token(token))
            .map(|expires_at| *expires_at > Utc::now())
            .unwrap_or(false)
    }

    pub async fn logout(&self, token: &str) {
        self.sessions.write().await.remove(&hash_token(token));
    }

    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .max_age(cookie::time::Duration::hours(self.session_hours))
            .build()
    }

    pub fn logout_cookie() -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .max_age(cookie::time::Duration::seconds(0))
            .build()
    }
}

fn generate_token() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wrong_password_gets_no_session() {
        let auth = AdminAuth::new("secret", 24);
        assert!(auth.login("Secret").await.is_none());
        assert!(auth.login("").await.is_none());
    }

    #[tokio::test]
    async fn token_is_valid_until_logout() {
        let auth = AdminAuth::new("secret", 24);
        let token = auth.login("secret").await.unwrap();
        assert_eq!(token.len(), 64);
        assert!(auth.validate(&token).await);
        assert!(!auth.validate("not-a-token").await);

        auth.logout(&token).await;
        assert!(!auth.validate(&token).await);
    }

    #[tokio::test]
    async fn expired_sessions_are_rejected() {
        let auth = AdminAuth::new("secret", 0);
        let token = auth.login("secret").await.unwrap();
        assert!(!auth.validate(&token).await);
    }
}
