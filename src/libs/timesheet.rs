//! The report pipeline: fetch, group, aggregate, render.
//!
//! ```text
//! IntervalSource ──▶ group_records ──▶ aggregate_buckets ──▶ ReportRenderer
//!       │                                     ▲
//!       └── fetch_projects (per-project) ─────┘
//! ```
//!
//! Nothing is written here; the caller decides where the rendered text
//! goes. Any failure aborts the run before a report exists.

use super::error::ReportError;
use super::grouping::{group_records, GroupingMode};
use super::interval::ProjectIndex;
use super::report::ReportRenderer;
use super::session::{aggregate_buckets, WorkSession};
use super::settings::ReportSettings;
use super::summary::{ProjectTotal, ProjectTotals};
use crate::api::IntervalSource;
use tracing::{debug, info};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct Timesheet {
    pub sessions: Vec<WorkSession>,
    /// Present for per-project reports only
    pub totals: Option<Vec<ProjectTotal>>,
    /// Rendered report text
    pub content: String,
}

/// Builds the report for `settings` from the intervals of `source`.
///
/// In per-project mode the projects referenced by the grouped intervals are
/// fetched concurrently before aggregation starts.
pub async fn build<S: IntervalSource>(source: &S, settings: &ReportSettings) -> Result<Timesheet, ReportError> {
    let records = source.fetch_intervals(&settings.range).await?;
    info!(count = records.len(), from = %settings.range.from, to = %settings.range.to, "fetched intervals");

    let buckets = group_records(records, &settings.grouping());
    debug!(buckets = buckets.len(), mode = ?settings.mode, "grouped intervals");

    let projects = match settings.mode {
        GroupingMode::PerProject => ProjectIndex::new(source.fetch_projects(&buckets.project_ids()).await?),
        GroupingMode::PerDay => ProjectIndex::default(),
    };

    let sessions = aggregate_buckets(&buckets, &settings.aggregation(), &projects)?;
    let totals = (settings.mode == GroupingMode::PerProject).then(|| sessions.project_totals());

    let content = ReportRenderer::new(settings.layout, &settings.date_format, &settings.names).render(&sessions, totals.as_deref())?;

    Ok(Timesheet { sessions, totals, content })
}
