//! Command line interface for the server binary.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{ServerConfig, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(name = "issues-server")]
#[command(about = "REST API for project-scoped issue tracking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (ignored if it does not exist)
    #[arg(long, env = "ISSUES_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Address to listen on, overriding the configuration file
    #[arg(long, env = "ISSUES_BIND")]
    pub bind: Option<String>,

    /// Report logical errors with 400/404 instead of 200
    #[arg(long, env = "ISSUES_STRICT_STATUS")]
    pub strict_status: bool,
}

impl Cli {
    /// Load the configuration file and apply the command line overrides.
    pub fn resolve_config(&self) -> Result<ServerConfig> {
        Ok(ServerConfig::load(&self.config)?.with_overrides(self.bind.clone(), self.strict_status))
    }
}
