//! Configuration management
//!
//! Configuration is loaded from a config.yml file with environment variable
//! overrides. Missing optional values fall back to sensible defaults, so a
//! bare checkout starts with an on-disk SQLite database and an insecure
//! development signing secret.

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
    /// Session authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
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
    /// CORS allowed origin (for cookie-based auth)
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
    3001
}

fn default_cors_origin() -> String {
    "http://localhost:5173".to_string()
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path or URL
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
    "data/gameboxd.db".to_string()
}

/// Session authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign and verify session tokens.
    ///
    /// Constant for the process lifetime; rotating it invalidates every
    /// outstanding session.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Mark the session cookie `Secure` (production deployments behind TLS)
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            secure_cookies: false,
        }
    }
}

fn default_token_secret() -> String {
    // Development fallback only; override via GAMEBOXD_AUTH_TOKEN_SECRET.
    "my_secret".to_string()
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
    /// Load configuration from file.
    ///
    /// If the file doesn't exist or is empty, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

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

    /// Load configuration from file with environment variable overrides.
    ///
    /// Environment variables follow the pattern:
    /// - GAMEBOXD_SERVER_HOST
    /// - GAMEBOXD_SERVER_PORT
    /// - GAMEBOXD_SERVER_CORS_ORIGIN
    /// - GAMEBOXD_DATABASE_URL
    /// - GAMEBOXD_AUTH_TOKEN_SECRET
    /// - GAMEBOXD_AUTH_SECURE_COOKIES
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("GAMEBOXD_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("GAMEBOXD_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("GAMEBOXD_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        if let Ok(url) = std::env::var("GAMEBOXD_DATABASE_URL") {
            self.database.url = url;
        }

        if let Ok(secret) = std::env::var("GAMEBOXD_AUTH_TOKEN_SECRET") {
            self.auth.token_secret = secret;
        }
        if let Ok(secure) = std::env::var("GAMEBOXD_AUTH_SECURE_COOKIES") {
            match secure.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.auth.secure_cookies = true,
                "0" | "false" | "no" => self.auth.secure_cookies = false,
                _ => {} // Ignore invalid values
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

// Shared mutex for config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.database.url, "data/gameboxd.db");
        assert_eq!(config.auth.token_secret, "my_secret");
        assert!(!config.auth.secure_cookies);
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 3000\n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.token_secret, "my_secret");
    }

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 9000
  cors_origin: "https://gameboxd.example"
database:
  url: "data/test.db"
auth:
  token_secret: "long-production-secret"
  secure_cookies: true
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors_origin, "https://gameboxd.example");
        assert_eq!(config.database.url, "data/test.db");
        assert_eq!(config.auth.token_secret, "long-production-secret");
        assert!(config.auth.secure_cookies);
    }

    #[test]
    fn test_load_invalid_yaml_reports_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: [not a port\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_overrides() {
        let _guard = lock_env();

        std::env::set_var("GAMEBOXD_SERVER_PORT", "4000");
        std::env::set_var("GAMEBOXD_AUTH_TOKEN_SECRET", "from-env");
        std::env::set_var("GAMEBOXD_AUTH_SECURE_COOKIES", "true");

        let config = Config::load_with_env(std::path::Path::new("nonexistent_config.yml")).unwrap();

        std::env::remove_var("GAMEBOXD_SERVER_PORT");
        std::env::remove_var("GAMEBOXD_AUTH_TOKEN_SECRET");
        std::env::remove_var("GAMEBOXD_AUTH_SECURE_COOKIES");

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.auth.token_secret, "from-env");
        assert!(config.auth.secure_cookies);
    }

    #[test]
    fn test_env_override_invalid_port_ignored() {
        let _guard = lock_env();

        std::env::set_var("GAMEBOXD_SERVER_PORT", "not-a-port");
        let config = Config::load_with_env(std::path::Path::new("nonexistent_config.yml")).unwrap();
        std::env::remove_var("GAMEBOXD_SERVER_PORT");

        assert_eq!(config.server.port, 3001);
    }
}
