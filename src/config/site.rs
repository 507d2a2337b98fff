//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Home page
    #[serde(default)]
    pub hero: HeroConfig,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Server
    #[serde(default)]
    pub server: ServerConfig,

    // Contact form
    #[serde(default)]
    pub contact: ContactConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: "I post about programming and web development.".to_string(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            posts_dir: "posts".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            hero: HeroConfig::default(),
            highlight: HighlightConfig::default(),
            server: ServerConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from `FOLIO_*` environment variables
    ///
    /// Credentials for the hosted document store are usually kept out of
    /// `_config.yml`; a `.env` file next to it is honoured as well.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_api = &mut self.contact.data_api;
        if let Some(endpoint) = lookup("FOLIO_DATA_API_ENDPOINT") {
            data_api.endpoint = endpoint;
        }
        if let Some(key) = lookup("FOLIO_DATA_API_KEY") {
            data_api.api_key = key;
        }
        if let Some(source) = lookup("FOLIO_DATA_SOURCE") {
            data_api.data_source = source;
        }
        if let Some(database) = lookup("FOLIO_DATABASE") {
            data_api.database = database;
        }
        if let Some(backend) = lookup("FOLIO_CONTACT_BACKEND") {
            match backend.parse() {
                Ok(b) => self.contact.backend = b,
                Err(e) => tracing::warn!("Ignoring FOLIO_CONTACT_BACKEND: {}", e),
            }
        }
    }
}

/// Landing page hero section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub name: String,
    pub image: String,
    pub tagline: String,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            name: "Max".to_string(),
            image: "/images/site/max.png".to_string(),
            tagline: "I blog about web development - especially frontend frameworks like Angular or React.".to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// `folio serve` defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

/// Which document store receives contact messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    /// JSON-lines files under `data_dir`
    File,
    /// Hosted document database reached through its HTTPS data API
    DataApi,
    /// In-process, lost on exit
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "file" => Ok(StoreBackend::File),
            "data-api" | "data_api" => Ok(StoreBackend::DataApi),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "unknown backend '{}'. Available: file, data-api, memory",
                other
            )),
        }
    }
}

/// Contact endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub backend: StoreBackend,
    pub collection: String,
    pub data_dir: String,
    #[serde(default)]
    pub data_api: DataApiConfig,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            collection: "messages".to_string(),
            data_dir: "data".to_string(),
            data_api: DataApiConfig::default(),
        }
    }
}

/// Hosted document store credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataApiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub data_source: String,
    pub database: String,
}
