use std::fs;
use std::path::Path;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::logging::LogLevel;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub youtube_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub database_path: Option<String>,
    pub web_host: Option<String>,
    pub web_port: Option<u16>,
    pub frontend_url: Option<String>,
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Config {
    const CONFIG_PATH: &'static str = "sentitube.conf";

    /// Load `sentitube.conf` when present, then let environment
    /// variables override individual keys.
    pub fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut config: Config = if Path::new(Self::CONFIG_PATH).exists() {
            toml::from_str(&fs::read_to_string(Self::CONFIG_PATH)?)?
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("YOUTUBE_API_KEY") {
            self.youtube_api_key = Some(v);
        }
        if let Ok(v) = std::env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(v);
        }
        if let Ok(v) = std::env::var("OPENAI_API_KEY") {
            self.openai_api_key = Some(v);
        }
        if let Ok(v) = std::env::var("DATABASE_PATH") {
            self.database_path = Some(v);
        }
        if let Ok(v) = std::env::var("WEB_HOST") {
            self.web_host = Some(v);
        }
        if let Ok(v) = std::env::var("WEB_PORT") {
            if let Ok(port) = v.parse() {
                self.web_port = Some(port);
            }
        }
        if let Ok(v) = std::env::var("FRONTEND_URL") {
            self.frontend_url = Some(v);
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            if let Ok(level) = LogLevel::from_str(&v) {
                self.log_level = level;
            }
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let toml = toml::to_string(self)?;
        fs::write(Self::CONFIG_PATH, toml)?;
        Ok(())
    }

    pub fn is_youtube_configured(&self) -> bool {
        self.youtube_api_key.is_some()
    }

    pub fn is_classifier_configured(&self) -> bool {
        self.gemini_api_key.is_some() || self.openai_api_key.is_some()
    }

    pub fn database_path(&self) -> String {
        self.database_path
            .clone()
            .unwrap_or_else(|| "sentitube.db".to_string())
    }
}
