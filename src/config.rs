//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! the `LISTEN` environment variable, then command-line flags.
//!
//! ```yaml
//! server:
//!   listen_addr: "0.0.0.0:8000"
//!   server_name: "PLAINSERVE"
//!   max_connections: 1024
//! static_files:
//!   root: "./www"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;

use crate::http::writer::DEFAULT_SERVER_NAME;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 10240;

/// Command-line arguments.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "plainserve")]
#[command(about = "Minimal HTTP/1.1 static file server")]
pub struct Cli {
    /// Directory to serve
    pub root: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8000
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Value of the `Server` response header
    pub server_name: String,
    /// Connections handled at the same time; the accept loop waits beyond it
    pub max_connections: usize,
    /// Upper bound for the request head, in bytes
    pub max_request_size: usize,
    pub read_timeout_ms: u64,
    pub write_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            max_connections: 1024,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
            read_timeout_ms: 30_000,
            write_timeout_ms: 30_000,
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("Invalid configuration")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&yaml)
    }

    /// Builds the effective configuration for a command line.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let cfg = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let mut cfg = cfg
            .with_listen_override(std::env::var("LISTEN").ok())
            .with_listen_override(cli.listen.clone());

        if let Some(root) = &cli.root {
            cfg.static_files.root = Some(root.clone());
        }

        Ok(cfg)
    }

    pub fn with_listen_override(mut self, listen: Option<String>) -> Self {
        if let Some(addr) = listen {
            self.server.listen_addr = addr;
        }
        self
    }

    /// Checks that the server can start, returning the root to serve.
    pub fn validate(&self) -> anyhow::Result<&str> {
        let Some(root) = self.static_files.root.as_deref() else {
            bail!("No directory to serve: pass a folder as the first argument");
        };

        if !Path::new(root).is_dir() {
            bail!("Server root {} is not a directory", root);
        }
        if self.server.max_connections == 0 {
            bail!("max_connections must be at least 1");
        }
        if self.server.max_request_size == 0 {
            bail!("max_request_size must be at least 1");
        }

        Ok(root)
    }
}
