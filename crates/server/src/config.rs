//! Server configuration loading.
//!
//! Settings come from an optional TOML file. If the file does not exist the
//! defaults apply; a file that exists but cannot be parsed is an error.
//! Command line flags are layered on top by [`ServerConfig::with_overrides`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::routes::ResponseMode;

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "issues.toml";

/// Root configuration structure.
///
/// ```toml
/// bind = "127.0.0.1:8080"
/// strict_status = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on (default: `0.0.0.0:3000`).
    pub bind: String,
    /// Report logical errors with 4xx status codes instead of `200 OK`.
    pub strict_status: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            strict_status: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `path` if it exists.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Apply command line overrides. `strict_status` can only be switched on.
    pub fn with_overrides(mut self, bind: Option<String>, strict_status: bool) -> Self {
        if let Some(bind) = bind {
            self.bind = bind;
        }
        self.strict_status |= strict_status;
        self
    }

    pub fn response_mode(&self) -> ResponseMode {
        if self.strict_status {
            ResponseMode::Strict
        } else {
            ResponseMode::Compatible
        }
    }
}
