use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::clients::nhl::NHL_API;
use crate::clients::weather::WEATHER_API;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    pub weather: WeatherConfig,

    pub nhl: NhlConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_url: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/paneboard.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens. There is deliberately no
    /// default: an empty secret fails `Config::validate`.
    pub jwt_secret: String,

    /// Session token lifetime (default: 3600 = 1 hour)
    pub token_ttl_seconds: u64,

    /// Max login attempts per client per window before 429 (default: 10)
    pub login_max_attempts: u32,

    /// Fixed rate-limit window for login attempts (default: 900 = 15 min)
    pub login_window_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_seconds: 3600,
            login_max_attempts: 10,
            login_window_seconds: 15 * 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,

    /// OpenWeatherMap API key. An empty key still forwards requests; the
    /// provider rejects them with its own status, which is passed through.
    pub api_key: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: WEATHER_API.to_string(),
            api_key: String::new(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NhlConfig {
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,

    /// Upper bound on in-flight per-player stat fetches (default: 8)
    pub player_fetch_concurrency: usize,
}

impl Default for NhlConfig {
    fn default() -> Self {
        Self {
            base_url: NHL_API.to_string(),
            request_timeout_seconds: 30,
            player_fetch_concurrency: 8,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                let mut config = Self::load_from_path(path)?;
                config.apply_env_overrides();
                return Ok(config);
            }
        }

        info!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Secrets and deploy-specific settings are taken from the environment
    /// when present, so they never have to live in the config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PANEBOARD_DATABASE_URL") {
            self.general.database_url = v;
        }
        if let Ok(v) = std::env::var("PANEBOARD_JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Ok(v) = std::env::var("PANEBOARD_WEATHER_API_KEY") {
            self.weather.api_key = v;
        }
        if let Ok(v) = std::env::var("PANEBOARD_PORT")
            && let Ok(port) = v.parse()
        {
            self.server.port = port;
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("paneboard").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".paneboard").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            anyhow::bail!(
                "auth.jwt_secret is required (set it in config.toml or PANEBOARD_JWT_SECRET)"
            );
        }

        if self.auth.login_max_attempts == 0 {
            anyhow::bail!("auth.login_max_attempts must be at least 1");
        }

        if self.nhl.player_fetch_concurrency == 0 {
            anyhow::bail!("nhl.player_fetch_concurrency must be at least 1");
        }

        if self.general.max_db_connections < self.general.min_db_connections {
            anyhow::bail!("general.max_db_connections must be >= min_db_connections");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();
        config
    }

    #[test]
    fn defaults_pass_validation_once_secret_is_set() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn missing_jwt_secret_fails_validation() {
        let config = Config::default();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("jwt_secret"));
    }

    #[test]
    fn zero_fetch_concurrency_fails_validation() {
        let mut config = valid_config();
        config.nhl.player_fetch_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [auth]
            jwt_secret = "from-file"

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.login_max_attempts, 10);
        assert_eq!(config.auth.login_window_seconds, 900);
        assert_eq!(config.nhl.base_url, NHL_API);
    }
}
