use super::sync::FALLBACK_QUOTE;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateProviderConfig {
    pub base_url: String,
    #[serde(default = "default_monitor")]
    pub monitor: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuoteProviderConfig {
    pub base_url: String,
}

fn default_monitor() -> String {
    "bcv".to_string()
}

impl Default for RateProviderConfig {
    fn default() -> Self {
        RateProviderConfig {
            base_url: "https://pydolarve.org".to_string(),
            monitor: default_monitor(),
        }
    }
}

impl Default for QuoteProviderConfig {
    fn default() -> Self {
        QuoteProviderConfig {
            base_url: "https://frasedeldia.azurewebsites.net".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub rate: RateProviderConfig,
    #[serde(default)]
    pub quote: QuoteProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retries: usize,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout_secs: default_timeout_secs(),
            retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default = "default_fallback_quote")]
    pub fallback_quote: String,
}

fn default_fallback_quote() -> String {
    FALLBACK_QUOTE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            http: HttpConfig::default(),
            fallback_quote: default_fallback_quote(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults when
    /// no config file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("ve", "tasa", "tasa")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let mut config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        if config.fallback_quote.trim().is_empty() {
            debug!("Blank fallback_quote in config, using the built-in one");
            config.fallback_quote = default_fallback_quote();
        }
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  rate:
    base_url: "http://example.com/rates"
    monitor: "enparalelovzla"
  quote:
    base_url: "http://example.com/quotes"
http:
  timeout_secs: 3
  retries: 2
fallback_quote: "Sigue adelante."
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.rate.base_url, "http://example.com/rates");
        assert_eq!(config.providers.rate.monitor, "enparalelovzla");
        assert_eq!(config.providers.quote.base_url, "http://example.com/quotes");
        assert_eq!(config.http.timeout(), Duration::from_secs(3));
        assert_eq!(config.http.retries, 2);
        assert_eq!(config.http.retry_delay_ms, 500);
        assert_eq!(config.fallback_quote, "Sigue adelante.");
    }

    #[test]
    fn test_config_defaults() {
        let yaml_str = r#"
providers:
  rate:
    base_url: "http://localhost:8080"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.rate.base_url, "http://localhost:8080");
        assert_eq!(config.providers.rate.monitor, "bcv");
        assert_eq!(
            config.providers.quote.base_url,
            "https://frasedeldia.azurewebsites.net"
        );
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.http.retries, 0);
        assert_eq!(config.fallback_quote, FALLBACK_QUOTE);

        let empty: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(empty.providers.rate.base_url, "https://pydolarve.org");
    }

    #[test]
    fn test_blank_fallback_quote_is_replaced() -> Result<()> {
        let config_file = tempfile::NamedTempFile::new()?;
        fs::write(config_file.path(), "fallback_quote: \"   \"\n")?;

        let config = AppConfig::load_from_path(config_file.path())?;
        assert_eq!(config.fallback_quote, FALLBACK_QUOTE);

        Ok(())
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/nonexistent/tasa/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
