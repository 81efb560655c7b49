//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Endpoint used when neither the config file nor the environment names one
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/exec";

/// Environment variable overriding the endpoint URL
pub const ENDPOINT_ENV: &str = "MAYALOAN_ENDPOINT";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Logging endpoint URL
    pub endpoint_url: Option<String>,
    /// User agent sent with submissions
    pub user_agent: Option<String>,
    /// Where the draft file lives
    pub draft_path: Option<PathBuf>,
    /// HTTP timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Move on automatically after a choice
    pub auto_advance: Option<bool>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "mayaloan", "mayaloan-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Endpoint URL: environment, then config file, then the default
    pub fn endpoint(&self) -> String {
        self.endpoint_from(std::env::var(ENDPOINT_ENV).ok())
    }

    fn endpoint_from(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.endpoint_url.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!(
                "mayaloan-tui/{} ({}; {})",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::OS,
                std::env::consts::ARCH
            )
        })
    }

    pub fn draft_path(&self) -> Option<PathBuf> {
        self.draft_path
            .clone()
            .or_else(crate::draft::DraftStore::default_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance.unwrap_or(true)
    }
}
