use crate::error::{ClientError, Result as ClientErrorResult};

use std::path::PathBuf;

use profile_auth::AuthUser;
use uuid::Uuid;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path (default: profiles.db)
    pub database_path: PathBuf,

    /// App origin the OAuth flow redirects back to
    /// (default: http://localhost:3000)
    pub app_origin: String,

    /// Log level (default: info)
    pub log_level: String,

    /// Optional path to log file. None = stdout
    pub log_file: Option<PathBuf>,

    /// Enable colored logs (default: true)
    pub log_colored: bool,

    /// Identity the local session hub hands out on sign-in. None means
    /// sign-in requests fail, as they do without a reachable provider.
    pub dev_identity: Option<AuthUser>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> ClientErrorResult<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "profiles.db".to_string())
            .into();

        let app_origin = std::env::var("APP_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_file = std::env::var("LOG_FILE").ok().map(PathBuf::from);

        let log_colored = std::env::var("LOG_COLORED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let dev_identity = match std::env::var("DEV_USER_ID") {
            Ok(raw) => {
                let id = Uuid::parse_str(&raw).map_err(|e| ClientError::EnvVar {
                    message: format!("DEV_USER_ID is not a valid UUID: {}", e),
                })?;
                Some(AuthUser {
                    id,
                    email: std::env::var("DEV_USER_EMAIL").ok(),
                })
            }
            Err(_) => None,
        };

        Ok(Self {
            database_path,
            app_origin,
            log_level,
            log_file,
            log_colored,
            dev_identity,
        })
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_ascii_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}
