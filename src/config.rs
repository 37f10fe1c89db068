use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GoCDError, Result};

/// Connection settings for one GoCD server.
///
/// Can be built in code or loaded from a TOML file, e.g.:
///
/// ```toml
/// server = "https://go.example.com"
/// username = "ci-reader"
/// password = "secret"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GoCDConfig {
    /// Server base URL (e.g. `https://go.example.com`)
    pub server: String,

    /// Basic-auth username; anonymous access when absent
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password
    #[serde(default)]
    pub password: Option<String>,
}

impl GoCDConfig {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(
        server: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| GoCDError::Config(format!("Failed to parse configuration: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server = \"https://go.example.com\"").unwrap();
        writeln!(file, "username = \"ci-reader\"").unwrap();
        writeln!(file, "password = \"secret\"").unwrap();

        let config = GoCDConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server, "https://go.example.com");
        assert_eq!(config.username.as_deref(), Some("ci-reader"));
        assert_eq!(config.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_credentials_are_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server = \"https://go.example.com\"").unwrap();

        let config = GoCDConfig::from_file(file.path()).unwrap();
        assert!(config.username.is_none());
        assert!(config.password.is_none());
    }

    #[test]
    fn test_missing_server_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "username = \"ci-reader\"").unwrap();

        assert!(GoCDConfig::from_file(file.path()).is_err());
    }
}
