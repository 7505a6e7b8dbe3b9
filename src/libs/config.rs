//! Configuration management for worklog.
//!
//! Settings live in a JSON file in the platform data directory and can be
//! overridden from the environment (a `.env` file in the working directory is
//! loaded at startup).
//!
//! ## Configuration Structure
//!
//! - **Toggl Config**: API endpoint and token of the time-tracking service
//! - **Report Config**: rounding interval, date format, output directory,
//!   default project selection and display-name overrides
//!
//! ## Environment Overrides
//!
//! | Variable             | Overrides                    |
//! |----------------------|------------------------------|
//! | `API_URL`            | `toggl.api_url`              |
//! | `API_TOKEN`          | `toggl.api_token`            |
//! | `ROUNDING_INTERVAL`  | `report.rounding_interval`   |
//! | `REPORT_DIR`         | `report.output_dir`          |
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use worklog::libs::config::Config;
//!
//! // Stored configuration with environment overrides applied
//! let config = Config::load()?;
//!
//! if let Some(report) = &config.report {
//!     println!("Rounding to {} minutes", report.rounding_interval);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::error::ConfigError;
use crate::api::TogglConfig;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_API_URL: &str = "https://api.track.toggl.com/api/v8/";
pub const DEFAULT_ROUNDING_INTERVAL: i64 = 15;
pub const DEFAULT_MS_PER_MINUTE: f64 = 60_000.0;
pub const DEFAULT_DATE_FORMAT: &str = "%-d.%-m.%Y";
pub const DEFAULT_OUTPUT_DIR: &str = "./dist";

/// Represents a configurable module in the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Report generation settings.
///
/// The rounding interval and conversion factor are stored as given and
/// validated when a report run resolves its settings, so a broken value in
/// the file surfaces as a configuration error rather than a parse failure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReportConfig {
    /// Granularity in minutes that session boundaries and breaks snap to.
    pub rounding_interval: i64,

    /// Milliseconds per minute used to convert raw gaps between intervals.
    pub ms_per_minute: f64,

    /// strftime pattern of the date column (`%-d.%-m.%Y` gives `1.3.2020`).
    pub date_format: String,

    /// Directory the report file is written to.
    pub output_dir: String,

    /// Projects included when the command line selects none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub project_ids: Vec<u64>,

    /// Display names by project id, replacing the names from the service.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub project_names: BTreeMap<u64, String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            rounding_interval: DEFAULT_ROUNDING_INTERVAL,
            ms_per_minute: DEFAULT_MS_PER_MINUTE,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            project_ids: Vec::new(),
            project_names: BTreeMap::new(),
        }
    }
}

/// Root configuration object.
///
/// Unconfigured sections are omitted from the JSON file.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Time-tracking service connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggl: Option<TogglConfig>,

    /// Report generation settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,
}

impl Config {
    /// Reads the configuration file, falling back to defaults when it does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Reads the configuration file and applies environment overrides.
    pub fn load() -> Result<Config> {
        let mut config = Self::read()?;
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Applies overrides looked up through `lookup`.
    ///
    /// Missing sections are created with defaults when an override touches
    /// them. Blank values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_url) = get("API_URL") {
            self.toggl.get_or_insert_with(TogglConfig::default).api_url = api_url;
        }
        if let Some(api_token) = get("API_TOKEN") {
            self.toggl.get_or_insert_with(TogglConfig::default).api_token = api_token;
        }
        if let Some(value) = get("ROUNDING_INTERVAL") {
            let interval = value.trim().parse::<i64>().map_err(|_| ConfigError::InvalidEnv {
                key: "ROUNDING_INTERVAL".to_string(),
                value: value.clone(),
            })?;
            self.report.get_or_insert_with(ReportConfig::default).rounding_interval = interval;
        }
        if let Some(output_dir) = get("REPORT_DIR") {
            self.report.get_or_insert_with(ReportConfig::default).output_dir = output_dir;
        }

        Ok(())
    }

    /// Runs the interactive setup wizard, starting from the stored values.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal input fails.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            TogglConfig::module(),
            ConfigModule {
                key: "report".to_string(),
                name: "Report".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "toggl" => config.toggl = Some(TogglConfig::init(&config.toggl)?),
                "report" => {
                    let default = config.report.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleReport);
                    config.report = Some(ReportConfig {
                        rounding_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptRoundingInterval.to_string())
                            .default(default.rounding_interval)
                            .validate_with(|value: &i64| {
                                if *value > 0 {
                                    Ok(())
                                } else {
                                    Err(Message::RoundingIntervalNotPositive.to_string())
                                }
                            })
                            .interact_text()?,
                        date_format: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDateFormat.to_string())
                            .default(default.date_format.clone())
                            .interact_text()?,
                        output_dir: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptOutputDir.to_string())
                            .default(default.output_dir.clone())
                            .interact_text()?,
                        ..default
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
