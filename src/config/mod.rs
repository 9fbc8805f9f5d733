//! Configuration management
//!
//! This module handles loading and parsing configuration for the Atelier backend.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Admin access configuration
    #[serde(default)]
    pub admin: AdminConfig,
    /// External image host configuration
    #[serde(default)]
    pub image_host: ImageHostConfig,
    /// Upload limits
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin (the site frontend)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path or `:memory:`
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/atelier.db".to_string()
}

/// Admin access configuration
///
/// The backend serves a single admin. Requests to admin endpoints must carry
/// this token as a bearer credential. An empty token disables admin access
/// entirely rather than leaving the endpoints open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Bearer token required on admin endpoints
    #[serde(default)]
    pub token: String,
}

/// External image host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageHostConfig {
    /// Upload endpoint of the image hosting service
    #[serde(default = "default_image_host_endpoint")]
    pub endpoint: String,
    /// API key passed with every upload
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds for host calls
    #[serde(default = "default_image_host_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        Self {
            endpoint: default_image_host_endpoint(),
            api_key: String::new(),
            timeout_seconds: default_image_host_timeout(),
        }
    }
}

fn default_image_host_endpoint() -> String {
    "https://api.imgbb.com/1/upload".to_string()
}

fn default_image_host_timeout() -> u64 {
    30
}

/// Upload limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum file size in bytes (default: 10MB)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed image MIME types
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_types: default_allowed_types(),
        }
    }
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/gif".to_string(),
        "image/webp".to_string(),
    ]
}

impl UploadConfig {
    /// Check if a MIME type is allowed
    pub fn is_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime_type)
    }
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        // Handle empty file - return defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - ATELIER_SERVER_HOST
    /// - ATELIER_SERVER_PORT
    /// - ATELIER_SERVER_CORS_ORIGIN
    /// - ATELIER_DATABASE_URL
    /// - ATELIER_ADMIN_TOKEN
    /// - ATELIER_IMAGE_HOST_ENDPOINT
    /// - ATELIER_IMAGE_HOST_API_KEY
    /// - ATELIER_IMAGE_HOST_TIMEOUT_SECONDS
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("ATELIER_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ATELIER_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("ATELIER_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        if let Ok(url) = std::env::var("ATELIER_DATABASE_URL") {
            self.database.url = url;
        }

        if let Ok(token) = std::env::var("ATELIER_ADMIN_TOKEN") {
            self.admin.token = token;
        }

        if let Ok(endpoint) = std::env::var("ATELIER_IMAGE_HOST_ENDPOINT") {
            self.image_host.endpoint = endpoint;
        }
        if let Ok(api_key) = std::env::var("ATELIER_IMAGE_HOST_API_KEY") {
            self.image_host.api_key = api_key;
        }
        if let Ok(timeout) = std::env::var("ATELIER_IMAGE_HOST_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.image_host.timeout_seconds = timeout;
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
