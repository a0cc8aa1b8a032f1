use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub ui: UiConfig,
}

/// Where the static content lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Root URL the catalog file and article bodies are served under.
    pub base_url: String,
    /// Catalog file name, resolved relative to `base_url`.
    pub catalog_file: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub sidebar_width: f32,
    /// Column width html2text wraps article bodies to.
    pub article_text_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/articles/".to_string(),
            catalog_file: "articles.json".to_string(),
            request_timeout_seconds: 10,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 900.0,
            window_height: 700.0,
            sidebar_width: 320.0,
            article_text_width: 100,
        }
    }
}

impl AppConfig {
    pub fn config_file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_dir = dirs::config_dir().ok_or("config directory not available")?;
        let app_config_dir = config_dir.join("readblog");
        std::fs::create_dir_all(&app_config_dir)?;
        Ok(app_config_dir.join("config.json"))
    }

    /// Loads the configuration file, falling back to (and writing out)
    /// the defaults when it is missing or unreadable.
    pub fn load() -> Self {
        match Self::load_from_file() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "could not load configuration, using defaults");
                let default_config = Self::default();
                if let Err(save_err) = default_config.save() {
                    warn!(error = %save_err, "could not save default configuration");
                }
                default_config
            }
        }
    }

    fn load_from_file() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::config_file_path()?;
        let config_content = std::fs::read_to_string(config_path)?;
        let config: AppConfig = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_file_path()?;
        let config_json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, config_json)?;
        Ok(())
    }
}
