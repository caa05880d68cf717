//! Configuration management.

use crate::{Result, SensorError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Poll interval in milliseconds
    #[serde(default = "default_poll")]
    pub poll: u64,

    /// Data sources to poll, by registry name
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,

    /// Proxy URL used by the VPN status check (e.g., "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy: Option<String>,

    /// Speedtest results configuration
    #[serde(default)]
    pub speedtest: SpeedtestConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

/// Speedtest results configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedtestConfig {
    /// Path to the JSON output of `speedtest -f json`
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for SpeedtestConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Endpoint returning the caller's address as `{"origin": "..."}`
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            lookup_url: default_lookup_url(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_poll() -> u64 {
    1000
}

fn default_sources() -> Vec<String> {
    vec!["example_numeric".to_string(), "example_text".to_string()]
}

fn default_log_path() -> PathBuf {
    PathBuf::from("speedtest.log")
}

fn default_lookup_url() -> String {
    "https://httpbin.org/ip".to_string()
}

fn default_timeout() -> u64 {
    5000
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SensorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| SensorError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl std::str::FromStr for Config {
    type Err = SensorError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll: default_poll(),
            sources: default_sources(),
            proxy: None,
            speedtest: SpeedtestConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config.poll, 1000);
        assert_eq!(config.proxy, None);
        assert_eq!(config.speedtest.log_path, PathBuf::from("speedtest.log"));
        assert_eq!(config.http.lookup_url, "https://httpbin.org/ip");
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_explicit_fields_override_defaults() {
        let config: Config = r#"
            poll = 250
            sources = ["vpn_status"]
            proxy = "http://10.0.0.1:3128"

            [speedtest]
            log_path = "/var/log/speedtest.json"

            [http]
            timeout = 1500
        "#
        .parse()
        .unwrap();

        assert_eq!(config.poll, 250);
        assert_eq!(config.sources, vec!["vpn_status".to_string()]);
        assert_eq!(config.proxy.as_deref(), Some("http://10.0.0.1:3128"));
        assert_eq!(
            config.speedtest.log_path,
            PathBuf::from("/var/log/speedtest.json")
        );
        assert_eq!(config.http.timeout, 1500);
        assert_eq!(config.http.lookup_url, "https://httpbin.org/ip");
    }

    #[test]
    fn test_invalid_config() {
        let result: Result<Config> = "poll = \"soon\"".parse();
        assert!(matches!(result, Err(SensorError::ConfigParse(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sensors.toml");

        let mut config = Config::default();
        config.proxy = Some("socks5://127.0.0.1:1080".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.proxy, config.proxy);
        assert_eq!(loaded.sources, config.sources);
    }

    #[test]
    fn test_save_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sensors.toml");
        let result = Config::default().save(&path);
        assert!(matches!(result, Err(SensorError::ConfigWrite { path: p, .. }) if p == path));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(SensorError::ConfigRead { .. })));
    }
}
