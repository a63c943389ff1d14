//! Runtime configuration
//!
//! Built once in `main` from CLI flags, an optional JSON config file and
//! the environment, then passed by reference into every component.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::{MirrorError, Result};

/// Environment variable consulted when no token is given explicitly
pub const TOKEN_ENV_VAR: &str = "GITLAB_TOKEN";

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the GitLab instance, e.g. `https://gitlab.example.com`
    pub host: String,
    /// Access token with read access to every project and group
    pub token: String,
    /// Local root directory mirrors are created under
    pub target_dir: PathBuf,
}

/// Optional values read from a JSON config file; CLI flags take precedence
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub token: Option<String>,
    pub target_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl Config {
    /// Merge CLI flags, config file values and the environment into a
    /// validated configuration
    pub fn resolve(
        host: Option<String>,
        token: Option<String>,
        target_dir: Option<PathBuf>,
        file: ConfigFile,
    ) -> Result<Self> {
        let host = host
            .or(file.host)
            .ok_or_else(|| MirrorError::InvalidConfig("no GitLab host given".into()))?;
        let token = token
            .or(file.token)
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
            .ok_or_else(|| MirrorError::InvalidConfig("no access token given".into()))?;
        let target_dir = target_dir
            .or(file.target_dir)
            .ok_or_else(|| MirrorError::InvalidConfig("no target directory given".into()))?;

        let config = Self {
            host,
            token,
            target_dir,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.host).map_err(|e| {
            MirrorError::InvalidConfig(format!("invalid host URL {}: {}", self.host, e))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(MirrorError::InvalidConfig(format!(
                "host must be an http(s) URL: {}",
                self.host
            )));
        }
        if self.token.trim().is_empty() {
            return Err(MirrorError::InvalidConfig("access token is empty".into()));
        }
        Ok(())
    }
}
