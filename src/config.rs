//! Client configuration
//!
//! This module contains the configuration used to build an
//! [`ApiClient`](crate::http::ApiClient). Configuration is loaded from a
//! JSON or YAML file (chosen by extension) and may be overlaid with proxy
//! settings from the environment.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables consulted for a proxy, in priority order
pub const PROXY_ENV_VARS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"];

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for the API client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL joined with relative request paths
    #[serde(default)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Proxy URL for all requests
    #[serde(default)]
    pub proxy: Option<String>,

    /// TLS material
    #[serde(default)]
    pub ssl: SslConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("api-pager/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            proxy: None,
            ssl: SslConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config with a base URL
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: Some(api_url.into()),
            ..Default::default()
        }
    }

    /// Load a config file; `.yaml`/`.yml` are YAML, everything else JSON
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        Ok(config)
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Set the proxy
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Fill in the proxy from the environment when none is configured
    #[must_use]
    pub fn with_env_proxy(self) -> Self {
        self.with_proxy_from(|key| std::env::var(key).ok())
    }

    /// Fill in the proxy from a variable lookup when none is configured
    #[must_use]
    pub fn with_proxy_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.proxy.is_none() {
            self.proxy = PROXY_ENV_VARS
                .iter()
                .filter_map(|key| lookup(key))
                .find(|v| !v.is_empty());
        }
        self
    }

    /// Validate values that would otherwise fail late
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.api_url {
            url::Url::parse(url)
                .map_err(|e| Error::invalid_value("api_url", e.to_string()))?;
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }
        if !self.ssl.certfile.is_empty() && self.ssl.keyfile.is_empty() {
            return Err(Error::invalid_value(
                "ssl.keyfile",
                "a client certificate requires a key",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// TLS
// ============================================================================

/// PEM files for custom CAs and a client identity.
///
/// Each field accepts a single path or a list of paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslConfig {
    #[serde(default, deserialize_with = "one_or_many")]
    pub cafile: Vec<PathBuf>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub certfile: Vec<PathBuf>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub keyfile: Vec<PathBuf>,
}

impl SslConfig {
    pub fn is_empty(&self) -> bool {
        self.cafile.is_empty() && self.certfile.is_empty() && self.keyfile.is_empty()
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PathBuf),
        Many(Vec<PathBuf>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(p)) => vec![p],
        Some(OneOrMany::Many(ps)) => ps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.api_url.is_none());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("api-pager/"));
        assert!(config.ssl.is_empty());
    }

    #[test]
    fn test_parse_json_config() {
        let json = r#"{
            "api_url": "https://api.example.com",
            "timeout_secs": 10,
            "ssl": { "cafile": "/etc/ca.pem", "certfile": ["/a.pem", "/b.pem"], "keyfile": "/k.pem" }
        }"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.ssl.cafile, vec![PathBuf::from("/etc/ca.pem")]);
        assert_eq!(
            config.ssl.certfile,
            vec![PathBuf::from("/a.pem"), PathBuf::from("/b.pem")]
        );
        assert_eq!(config.ssl.keyfile, vec![PathBuf::from("/k.pem")]);
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "api_url: https://api.example.com\nproxy: http://proxy:3128").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:3128"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"api_url": "https://json.example.com"}}"#).unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://json.example.com"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClientConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_proxy_lookup() {
        let config = ClientConfig::default().with_proxy_from(|key| match key {
            "HTTP_PROXY" => Some("http://fallback:80".to_string()),
            "https_proxy" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.proxy.as_deref(), Some("http://fallback:80"));

        let config = ClientConfig::default()
            .with_proxy("http://explicit:1")
            .with_proxy_from(|_| Some("http://ignored:2".to_string()));
        assert_eq!(config.proxy.as_deref(), Some("http://explicit:1"));
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::new("https://api.example.com").validate().is_ok());
        assert!(ClientConfig::new("not a url").validate().is_err());

        let mut config = ClientConfig::default();
        config.ssl.certfile.push(PathBuf::from("/cert.pem"));
        assert!(config.validate().is_err());
    }
}
