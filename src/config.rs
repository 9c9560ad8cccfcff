// ABOUTME: Configuration loading for chatline.
// ABOUTME: Reads ~/.chatline/config.toml, then applies environment and CLI overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Environment variable overriding `server.base_url`.
pub const BASE_URL_ENV: &str = "CHATLINE_BASE_URL";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Where the chat service lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

/// Timers of the submission pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub request_timeout_secs: u64,
    pub health_interval_secs: u64,
    pub settle_delay_ms: u64,
    pub error_banner_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            health_interval_secs: 30,
            settle_delay_ms: 500,
            error_banner_secs: 5,
        }
    }
}

impl TimingConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs.max(1))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn error_banner(&self) -> Duration {
        Duration::from_secs(self.error_banner_secs)
    }
}

/// Presentation options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Full Markdown for bot replies; `false` selects the minimal formatter.
    pub markdown: bool,
    /// Suggested questions shown while the transcript is empty.
    pub suggestions: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            markdown: true,
            suggestions: vec![
                "What can you help me with?".to_string(),
                "Summarize what you know about this topic.".to_string(),
                "How do I get started?".to_string(),
            ],
        }
    }
}

/// Log file settings. The terminal belongs to the UI, so logs go to a file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Configured log file, or `<data dir>/chatline/chatline.log`.
    pub fn file_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("chatline")
                .join("chatline.log")
        })
    }
}

impl Config {
    /// Load config from ~/.chatline/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Invalid config file '{}': {}", path.display(), e)
        })?;
        Ok(config)
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chatline")
            .join("config.toml")
    }

    /// Apply `CHATLINE_BASE_URL` when set and non-empty.
    pub fn apply_env(&mut self) {
        self.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
    }

    pub fn apply_base_url_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.server.base_url = url.trim().to_string();
        }
    }
}
