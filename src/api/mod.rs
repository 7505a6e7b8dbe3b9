//! Clients for the time-tracking service.
//!
//! The report pipeline only depends on the [`IntervalSource`] trait. The
//! Toggl client is the production implementation; tests plug in their own.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use worklog::api::{IntervalSource, Toggl, TogglConfig};
//! use worklog::libs::settings::DateRange;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let toggl = Toggl::new(&TogglConfig::default());
//! let entries = toggl.fetch_intervals(&DateRange::parse_month("2020-03")?).await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::interval::{IntervalRecord, Project, ProjectId};
use crate::libs::settings::DateRange;
use futures::future::try_join_all;
use reqwest::StatusCode;
use thiserror::Error;

pub mod toggl;

pub use toggl::{Toggl, TogglConfig};

/// A request to the time-tracking service did not produce usable data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid date range: {0}")]
    Range(String),
}

/// Supplier of tracked intervals and project metadata.
#[allow(async_fn_in_trait)]
pub trait IntervalSource {
    /// Intervals of the days in `range`, ordered by start.
    ///
    /// # Errors
    ///
    /// Any transport failure or non-success status aborts the run.
    async fn fetch_intervals(&self, range: &DateRange) -> Result<Vec<IntervalRecord>, FetchError>;

    /// Metadata of a single project.
    async fn fetch_project(&self, id: ProjectId) -> Result<Project, FetchError>;

    /// Fetches all `ids` concurrently and returns the projects in the
    /// order requested. The first failure fails the whole lookup.
    async fn fetch_projects(&self, ids: &[ProjectId]) -> Result<Vec<Project>, FetchError> {
        try_join_all(ids.iter().map(|&id| self.fetch_project(id))).await
    }
}
