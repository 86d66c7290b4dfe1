use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_EMAIL_DOMAIN, DEFAULT_REFERENCE_DATE};
use crate::error::{RecordError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Date ages are computed against. Frozen, not "today".
    #[serde(default = "default_reference_date")]
    pub reference_date: NaiveDate,
    /// Domain used for generated email addresses
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reference_date: default_reference_date(),
            email_domain: default_email_domain(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for the daily-rolling JSON log. Console only when unset.
    #[serde(default)]
    pub json_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_dir: None,
        }
    }
}

fn default_reference_date() -> NaiveDate {
    let (year, month, day) = DEFAULT_REFERENCE_DATE;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn default_email_domain() -> String {
    DEFAULT_EMAIL_DOMAIN.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: Config = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            RecordError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let domain = self.pipeline.email_domain.trim();
        if domain.is_empty() {
            return Err(RecordError::Config("email_domain must not be empty".into()));
        }
        if domain.contains('@') {
            return Err(RecordError::Config(format!(
                "email_domain must be a bare domain, got '{}'",
                domain
            )));
        }
        Ok(())
    }
}
