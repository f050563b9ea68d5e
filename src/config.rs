//! Application configuration management.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global configuration instance.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Default cap on JSON request bodies. The whole client state travels in a
/// single save request, so this is far above actix's 32 KiB default.
const DEFAULT_JSON_LIMIT: usize = 16 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Path to the persisted state document.
    pub state_file: PathBuf,
    /// Path to the uploaded music folder.
    pub music_folder: PathBuf,
    /// Front-end entry page served at `/`.
    pub index_file: PathBuf,
    /// Maximum accepted JSON body size in bytes.
    pub json_limit: usize,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json or pretty).
    pub log_format: LogFormat,
    /// Allowed CORS origins (comma-separated, or * for all).
    pub cors_origins: Vec<String>,
}

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable colored output.
    Pretty,
    /// JSON structured logging.
    Json,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16");

        let state_file = PathBuf::from(
            std::env::var("STATE_FILE").unwrap_or_else(|_| "./data/app_data.json".to_string()),
        );

        let music_folder = PathBuf::from(
            std::env::var("MUSIC_FOLDER").unwrap_or_else(|_| "./music".to_string()),
        );

        let index_file = PathBuf::from(
            std::env::var("INDEX_FILE").unwrap_or_else(|_| "./index.html".to_string()),
        );

        let json_limit = std::env::var("JSON_LIMIT_BYTES")
            .ok()
            .map(|v| {
                v.parse::<usize>()
                    .expect("JSON_LIMIT_BYTES must be a valid integer")
            })
            .unwrap_or(DEFAULT_JSON_LIMIT);

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port,
            state_file,
            music_folder,
            index_file,
            json_limit,
            log_level,
            log_format,
            cors_origins,
        }
    }

    /// Validate the configuration, creating missing data directories.
    ///
    /// # Errors
    /// Returns an error if a directory cannot be created or a configured
    /// directory path points at something else.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_dir(&self.music_folder)?;

        if let Some(parent) = self.state_dir() {
            ensure_dir(parent)?;
        }

        if !self.index_file.is_file() {
            tracing::warn!(
                path = %self.index_file.display(),
                "Index page not found, GET / will return 404"
            );
        }

        Ok(())
    }

    /// Directory holding the state document, if the path has one.
    pub fn state_dir(&self) -> Option<&Path> {
        self.state_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn ensure_dir(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(ConfigError::NotADirectory(path.display().to_string()));
        }
        return Ok(());
    }

    std::fs::create_dir_all(path)
        .map_err(|e| ConfigError::DirectoryCreationFailed(path.display().to_string(), e))?;
    tracing::info!(path = %path.display(), "Created directory");
    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Path exists but is not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to create directory '{0}': {1}")]
    DirectoryCreationFailed(String, std::io::Error),
}

/// Initialize the global configuration.
///
/// Should be called once at application startup.
pub fn init() -> &'static Config {
    CONFIG.get_or_init(|| {
        dotenvy::dotenv().ok();
        Config::from_env()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            state_file: dir.join("data").join("app_data.json"),
            music_folder: dir.join("music"),
            index_file: dir.join("index.html"),
            json_limit: DEFAULT_JSON_LIMIT,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            cors_origins: vec!["*".to_string()],
        }
    }

    #[test]
    fn test_default_config() {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("STATE_FILE");
        std::env::remove_var("JSON_LIMIT_BYTES");

        let config = Config::from_env();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.state_file, PathBuf::from("./data/app_data.json"));
        assert_eq!(config.json_limit, DEFAULT_JSON_LIMIT);
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_cors_origins_parsing() {
        std::env::set_var("CORS_ORIGINS", "http://localhost:3000, http://example.com");

        let config = Config::from_env();

        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.cors_origins.contains(&"http://localhost:3000".to_string()));
        assert!(config.cors_origins.contains(&"http://example.com".to_string()));

        std::env::remove_var("CORS_ORIGINS");
    }

    #[test]
    fn test_validate_creates_directories() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        config.validate().unwrap();

        assert!(dir.path().join("music").is_dir());
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn test_validate_rejects_file_as_music_folder() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.music_folder, b"not a dir").unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_state_dir_for_bare_filename() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.state_file = PathBuf::from("app_data.json");

        assert!(config.state_dir().is_none());
    }
}
