//! Configuration management for the Tawfiq service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{Result, TawfiqError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Reference corpus configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Path to the Quran corpus JSON file
    #[serde(default = "default_quran_path")]
    pub quran_path: PathBuf,

    /// Path to the Hadith corpus JSON file
    #[serde(default = "default_hadith_path")]
    pub hadith_path: PathBuf,

    /// Base URL for per-verse recitation audio. When set, verses
    /// without an explicit audio reference get
    /// `{base}/SSSVVV.mp3` built from surah/verse numbers.
    #[serde(default = "default_audio_base_url")]
    pub audio_base_url: Option<String>,
}

/// Completion provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Chat-completions endpoint (OpenAI-compatible)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Hard timeout for a single provider call, in seconds.
    /// This is the only suspension point in the system that can
    /// block on an external dependency.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Bearer API key. Usually supplied via TAWFIQ_API_KEY or
    /// OPENAI_API_KEY rather than the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// System persona prepended to every conversation
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_quran_path() -> PathBuf {
    PathBuf::from("./data/quran.json")
}

fn default_hadith_path() -> PathBuf {
    PathBuf::from("./data/hadith.json")
}

fn default_audio_base_url() -> Option<String> {
    Some("https://everyayah.com/data/Alafasy_128kbps".to_string())
}

fn default_api_base_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.4
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_system_prompt() -> String {
    "You are Tawfiq, a respectful and knowledgeable Islamic assistant. \
     Answer in clear English, cite Quran verses or authentic Hadith where \
     appropriate, and keep answers concise enough to be read aloud. \
     If a question is outside Islamic knowledge, say so politely."
        .to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            quran_path: default_quran_path(),
            hadith_path: default_hadith_path(),
            audio_base_url: default_audio_base_url(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
            api_key: None,
            system_prompt: default_system_prompt(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TawfiqError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// File location priority:
    /// 1. TAWFIQ_CONFIG env var
    /// 2. ./tawfiq.toml
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("TAWFIQ_CONFIG") {
            Self::from_file(config_path)?
        } else if Path::new("tawfiq.toml").exists() {
            Self::from_file("tawfiq.toml")?
        } else {
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Server configuration
        if let Ok(host) = env::var("TAWFIQ_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("TAWFIQ_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Corpus configuration
        if let Ok(path) = env::var("TAWFIQ_QURAN_PATH") {
            self.corpus.quran_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("TAWFIQ_HADITH_PATH") {
            self.corpus.hadith_path = PathBuf::from(path);
        }

        // Provider configuration
        if let Ok(url) = env::var("TAWFIQ_API_BASE_URL") {
            self.provider.api_base_url = url;
        }
        if let Ok(model) = env::var("TAWFIQ_MODEL") {
            self.provider.model = model;
        }
        if let Ok(timeout) = env::var("TAWFIQ_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.provider.timeout_seconds = t;
            }
        }
        if let Ok(key) = env::var("TAWFIQ_API_KEY") {
            self.provider.api_key = Some(key);
        } else if let Ok(key) = env::var("OPENAI_API_KEY") {
            if self.provider.api_key.is_none() {
                self.provider.api_key = Some(key);
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(TawfiqError::ConfigError(
                "Server port must be non-zero".to_string(),
            ));
        }

        if self.provider.api_base_url.is_empty() {
            return Err(TawfiqError::ConfigError(
                "Provider API base URL must not be empty".to_string(),
            ));
        }

        if self.provider.model.is_empty() {
            return Err(TawfiqError::ConfigError(
                "Provider model must not be empty".to_string(),
            ));
        }

        if self.provider.timeout_seconds == 0 {
            return Err(TawfiqError::ConfigError(
                "Provider timeout must be non-zero".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(TawfiqError::ConfigError(
                "Provider temperature must be within [0.0, 2.0]".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (redacting the API key)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Bind: {}:{}", self.server.host, self.server.port);
        tracing::info!("  Quran corpus: {:?}", self.corpus.quran_path);
        tracing::info!("  Hadith corpus: {:?}", self.corpus.hadith_path);
        tracing::info!(
            "  Audio base URL: {}",
            self.corpus.audio_base_url.as_deref().unwrap_or("<none>")
        );
        tracing::info!("  Provider endpoint: {}", self.provider.api_base_url);
        tracing::info!("  Provider model: {}", self.provider.model);
        tracing::info!("  Provider timeout: {}s", self.provider.timeout_seconds);
        tracing::info!(
            "  Provider API key: {}",
            if self.provider.api_key.is_some() {
                "set (redacted)"
            } else {
                "not set"
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.corpus.quran_path, PathBuf::from("./data/quran.json"));
    }

    #[test]
    fn test_config_validation_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.provider.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_temperature_range() {
        let mut config = Config::default();
        config.provider.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_model() {
        let mut config = Config::default();
        config.provider.model = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_override() {
        env::set_var("TAWFIQ_TIMEOUT_SEC", "5");

        let mut config = Config::default();
        config.merge_env();

        assert_eq!(config.provider.timeout_seconds, 5);

        env::remove_var("TAWFIQ_TIMEOUT_SEC");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [corpus]
            quran_path = "/srv/tawfiq/quran.json"
            hadith_path = "/srv/tawfiq/hadith.json"

            [provider]
            api_base_url = "http://localhost:11434/v1/chat/completions"
            model = "llama3"
            timeout_seconds = 10
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.provider.model, "llama3");
        assert_eq!(config.provider.timeout_seconds, 10);
        assert_eq!(
            config.corpus.quran_path,
            PathBuf::from("/srv/tawfiq/quran.json")
        );
        // Unspecified fields fall back to defaults
        assert_eq!(config.provider.temperature, 0.4);
    }

    #[test]
    fn test_system_prompt_default_present() {
        let config = Config::default();
        assert!(config.provider.system_prompt.contains("Tawfiq"));
    }
}
