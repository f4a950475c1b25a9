//! Configuration loaded from `~/.config/dogan-live/config.toml`.
//!
//! ```toml
//! default_quality = "720"
//!
//! [http]
//! timeout_secs = 20
//! user_agent = "Mozilla/5.0 (X11; Linux x86_64) ..."
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, StreamError};
use crate::fingerprint::DEFAULT_ACCEPT_LANGUAGE;

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Fixed User-Agent; a random desktop browser profile is used when unset.
    pub user_agent: Option<String>,
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: None,
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quality used by `dogan-live url` when `--quality` is not given.
    pub default_quality: String,
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_quality: "best".to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// location is used and a missing file yields [`Config::default`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StreamError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
            .map_err(|e| StreamError::Config(format!("invalid TOML in {}: {e}", path.display())))
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Return the path to the default config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dogan-live")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_full_config() {
        let config = Config::parse(
            r#"
default_quality = "720"

[http]
timeout_secs = 5
connect_timeout_secs = 2
user_agent = "dogan-live/0.1"
accept_language = "en-US"
"#,
        )
        .unwrap();

        assert_eq!(config.default_quality, "720");
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert_eq!(config.http.connect_timeout(), Duration::from_secs(2));
        assert_eq!(config.http.user_agent.as_deref(), Some("dogan-live/0.1"));
        assert_eq!(config.http.accept_language, "en-US");
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::parse("[http]\ntimeout_secs = 12\n").unwrap();
        assert_eq!(config.default_quality, "best");
        assert_eq!(config.http.timeout_secs, 12);
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert!(config.http.user_agent.is_none());
    }

    #[test]
    fn empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.default_quality, "best");
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(Config::parse("[http]\ntimeout_secs = \"soon\"\n").is_err());
    }

    #[test]
    fn load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_quality = \"worst\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.default_quality, "worst");
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));
    }

    #[test]
    fn load_invalid_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_quality = ").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn config_path_ends_with_expected_file() {
        let path = config_path();
        assert!(path.ends_with("dogan-live/config.toml"));
    }
}
