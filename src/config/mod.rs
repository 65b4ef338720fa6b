use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

/// Placeholder admin password; startup warns while it is in use.
pub const DEFAULT_ADMIN_PASSWORD: &str = "change-me-in-production";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public site URL used in robots.txt and sitemap.xml.
    pub base_url: String,
    pub uploads_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// When set, content lives in this SQLite database.
    pub database_url: Option<String>,
    pub data_file: String,
    #[serde(default)]
    pub ephemeral: bool,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub password: String,
    pub session_hours: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite { url: String },
    Memory,
    File { path: String },
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_environment(Environment::with_prefix("YERAM").separator("__"))
    }

    /// Builds settings with `environment` as the `YERAM__*` source.
    pub fn with_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_url", "http://localhost:8080")?
            .set_default("server.uploads_dir", "uploads")?
            .set_default("storage.data_file", "data.json")?
            .set_default("storage.ephemeral", false)?
            .set_default("storage.max_connections", 5)?
            .set_default("admin.password", DEFAULT_ADMIN_PASSWORD)?
            .set_default("admin.session_hours", 24)?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with YERAM__ prefix, double underscore separates levels)
            .add_source(environment)

            // Plain variables used by existing deployments
            .set_override_option("storage.database_url", non_empty_var("DATABASE_URL"))?
            .set_override_option("storage.data_file", non_empty_var("DATA_FILE_PATH"))?
            .set_override_option("server.base_url", non_empty_var("SITE_URL"))?

            .build()?;

        config.try_deserialize()
    }

    /// Picks the storage backend: database first, then ephemeral memory, then the JSON file.
    pub fn storage_backend(&self) -> StorageBackend {
        match self.storage.database_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => StorageBackend::Sqlite { url: url.to_string() },
            _ if self.storage.ephemeral => StorageBackend::Memory,
            _ => StorageBackend::File { path: self.storage.data_file.clone() },
        }
    }
}

impl ServerConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
                uploads_dir: "uploads".to_string(),
            },
            storage: StorageConfig {
                database_url: None,
                data_file: "data.json".to_string(),
                ephemeral: false,
                max_connections: 5,
            },
            admin: AdminConfig {
                password: DEFAULT_ADMIN_PASSWORD.to_string(),
                session_hours: 24,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_wins_over_file() {
        let mut settings = Settings::default();
        settings.storage.database_url = Some("sqlite://site.db".to_string());
        settings.storage.ephemeral = true;
        assert_eq!(
            settings.storage_backend(),
            StorageBackend::Sqlite { url: "sqlite://site.db".to_string() }
        );
    }

    #[test]
    fn blank_database_url_falls_back_to_file() {
        let mut settings = Settings::default();
        settings.storage.database_url = Some("  ".to_string());
        settings.storage.data_file = "/data/data.json".to_string();
        assert_eq!(
            settings.storage_backend(),
            StorageBackend::File { path: "/data/data.json".to_string() }
        );
    }

    #[test]
    fn ephemeral_selects_memory() {
        let mut settings = Settings::default();
        settings.storage.ephemeral = true;
        assert_eq!(settings.storage_backend(), StorageBackend::Memory);
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let mut settings = Settings::default();
        settings.server.base_url = "https://example.org/".to_string();
        assert_eq!(settings.server.base_url(), "https://example.org");
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("YERAM").separator("__").source(Some(source))
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::with_environment(env(&[
            ("YERAM__SERVER__PORT", "9090"),
            ("YERAM__ADMIN__PASSWORD", "hunter2"),
        ]))
        .unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.admin.password, "hunter2");
    }

    #[test]
    fn malformed_values_are_an_error() {
        let result = Settings::with_environment(env(&[("YERAM__SERVER__PORT", "eighty")]));
        assert!(result.is_err());
    }
}
