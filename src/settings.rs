use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::balancer;
use crate::sheets;

/// Process-wide settings, read from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path to the Google service account key (`SERVICE_ACCOUNT_FILE`)
    pub service_account_file: PathBuf,

    /// Balancer GraphQL endpoint (`BALANCER_API_URL`)
    pub balancer_api_url: String,

    /// Sheets v4 base URL (`SHEETS_API_URL`)
    pub sheets_api_url: String,

    /// Drive v3 base URL (`DRIVE_API_URL`)
    pub drive_api_url: String,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_source(None)
    }

    /// Load settings from `source` instead of the process environment when given
    pub fn from_source(source: Option<HashMap<String, String>>) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("balancer_api_url", balancer::config::DEFAULT_API_URL)?
            .set_default("sheets_api_url", sheets::config::DEFAULT_SHEETS_API_URL)?
            .set_default("drive_api_url", sheets::config::DEFAULT_DRIVE_API_URL)?
            .add_source(config::Environment::default().source(source))
            .build()
            .context("Failed to read settings")?;

        settings
            .try_deserialize()
            .context("SERVICE_ACCOUNT_FILE must be set in environment variables")
    }

    pub fn balancer_config(&self) -> balancer::Config {
        balancer::Config {
            api_url: self.balancer_api_url.clone(),
        }
    }

    pub fn sheets_config(&self) -> sheets::Config {
        sheets::Config {
            sheets_api_url: self.sheets_api_url.clone(),
            drive_api_url: self.drive_api_url.clone(),
            ..sheets::Config::default()
        }
    }
}
