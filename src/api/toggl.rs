//! Toggl API client for time entries and projects.
//!
//! ## Endpoints
//!
//! - `GET {api_url}time_entries?start_date=..&end_date=..`: time entries
//!   of the authenticated user, ISO 8601 bounds
//! - `GET {api_url}projects/{id}`: project metadata wrapped in `data`
//!
//! Requests authenticate with HTTP basic auth, the API token as user name
//! and the literal `api_token` as password.
//!
//! ## Entry conversion
//!
//! Entries are converted to local wall-clock intervals. Running entries
//! have no stop yet and entries that stop before they start cannot be
//! aggregated; both are skipped with a warning.

use super::{FetchError, IntervalSource};
use crate::libs::config::{ConfigModule, DEFAULT_API_URL};
use crate::libs::interval::{IntervalRecord, Project, ProjectId};
use crate::libs::messages::Message;
use crate::libs::settings::DateRange;
use crate::msg_print;
use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local};
use dialoguer::{theme::ColorfulTheme, Input, Password};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Password sent alongside the token in basic auth.
const API_TOKEN_PASSWORD: &str = "api_token";
const TIME_ENTRIES_PATH: &str = "time_entries";
const PROJECTS_PATH: &str = "projects";

/// A time entry as returned by the service. Only the consumed fields are
/// declared.
#[derive(Debug, Deserialize)]
struct TimeEntry {
    id: u64,
    #[serde(default)]
    pid: Option<u64>,
    start: DateTime<FixedOffset>,
    #[serde(default)]
    stop: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize)]
struct ProjectEnvelope {
    data: ProjectData,
}

#[derive(Debug, Deserialize)]
struct ProjectData {
    id: u64,
    name: String,
}

impl TimeEntry {
    fn into_record(self) -> Option<IntervalRecord> {
        let Some(stop) = self.stop else {
            warn!(entry = self.id, "skipping running time entry");
            return None;
        };
        if stop < self.start {
            warn!(entry = self.id, start = %self.start, stop = %stop, "skipping time entry that stops before it starts");
            return None;
        }

        Some(IntervalRecord::new(
            self.start.with_timezone(&Local).naive_local(),
            stop.with_timezone(&Local).naive_local(),
            self.pid.map(ProjectId),
        ))
    }
}

/// Toggl API client.
///
/// Holds a pooled HTTP client; clones of the configuration are cheap and the
/// client can serve concurrent lookups.
#[derive(Debug)]
pub struct Toggl {
    client: Client,
    config: TogglConfig,
}

impl Toggl {
    pub fn new(config: &TogglConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Sends an authenticated GET and decodes the JSON body.
    ///
    /// Anything but a 2xx status is an error; the body of a failed response
    /// is not inspected.
    async fn get_json<T: DeserializeOwned>(&self, url: String, query: &[(&str, String)]) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let response = match self
            .client
            .get(&url)
            .basic_auth(&self.config.api_token, Some(API_TOKEN_PASSWORD))
            .query(query)
            .send()
            .await
        {
            Ok(response) => response,
            Err(source) => return Err(FetchError::Transport { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        response.json::<T>().await.map_err(|source| FetchError::Decode { url, source })
    }
}

impl IntervalSource for Toggl {
    async fn fetch_intervals(&self, range: &DateRange) -> Result<Vec<IntervalRecord>, FetchError> {
        let (start, end) = range.query_bounds().map_err(|e| FetchError::Range(e.to_string()))?;
        let query = [("start_date", start.to_rfc3339()), ("end_date", end.to_rfc3339())];

        let entries: Vec<TimeEntry> = self.get_json(self.url(TIME_ENTRIES_PATH), &query).await?;
        debug!(count = entries.len(), "received time entries");

        Ok(entries.into_iter().filter_map(TimeEntry::into_record).collect())
    }

    async fn fetch_project(&self, id: ProjectId) -> Result<Project, FetchError> {
        let envelope: ProjectEnvelope = self.get_json(self.url(&format!("{}/{}", PROJECTS_PATH, id)), &[]).await?;

        Ok(Project {
            id: ProjectId(envelope.data.id),
            name: envelope.data.name,
        })
    }
}

/// Connection settings of the Toggl API.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TogglConfig {
    /// Base URL of the API, including the version segment.
    ///
    /// Example: `https://api.track.toggl.com/api/v8/`
    pub api_url: String,

    /// Personal API token from the Toggl profile page.
    pub api_token: String,
}

impl Default for TogglConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: String::new(),
        }
    }
}

impl TogglConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "toggl".to_string(),
            name: "Toggl".to_string(),
        }
    }

    /// Prompts for the API URL and token, offering the stored values as
    /// defaults. An empty token answer keeps the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal input fails.
    pub fn init(config: &Option<TogglConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();

        msg_print!(Message::ConfigModuleToggl);

        let api_url = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptApiUrl.to_string())
            .default(config.api_url)
            .interact_text()?;
        let api_token = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptApiToken.to_string())
            .allow_empty_password(true)
            .interact()?;

        Ok(Self {
            api_url,
            api_token: if api_token.is_empty() { config.api_token } else { api_token },
        })
    }
}
