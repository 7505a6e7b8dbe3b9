//! Aggregation of day buckets into rounded work sessions.
//!
//! A session spans from the rounded start of the first interval of a bucket
//! to the rounded stop of its last interval. The gaps between consecutive
//! intervals are summed as break time and rounded with the same interval,
//! and the net work time is what remains.
//!
//! ```text
//! 08:02 ──── 12:14       13:00 ──── 17:00
//!   │                       │          │
//!   ▼ round(15)             │          ▼ round(15)
//! 08:00      break = 46min → 45min    17:00
//!
//! work = (17:00 - 08:00) - 45min = 495min
//! ```
//!
//! Overlapping intervals produce negative gaps. They are summed as they are,
//! which shortens the break, and a warning is logged for the affected day.

use super::error::ReportError;
use super::grouping::{DayBucket, DayBuckets};
use super::interval::{IntervalRecord, Project, ProjectIndex};
use super::rounding::{round_minute_count, round_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

/// The two numbers the aggregation depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationSettings {
    /// Rounding granularity in minutes, always positive
    pub rounding_interval: u32,
    /// Milliseconds per minute used to convert raw gaps
    pub ms_per_minute: f64,
}

/// What a session covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionScope {
    /// All of a day's intervals
    Day,
    /// The day's intervals on one project; `None` for intervals tracked
    /// without a project
    Project(Option<Project>),
}

/// Aggregated, rounded representation of one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSession {
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
    pub break_minutes: i64,
    pub work_minutes: i64,
    pub scope: SessionScope,
}

impl WorkSession {
    /// Minutes between the rounded boundaries, breaks included.
    pub fn span_minutes(&self) -> i64 {
        (self.stop - self.start).num_minutes()
    }

    pub fn project(&self) -> Option<&Project> {
        match &self.scope {
            SessionScope::Project(project) => project.as_ref(),
            SessionScope::Day => None,
        }
    }
}

/// Aggregates one ordered list of intervals into a session.
///
/// Returns `None` for an empty list. The caller decides the scope.
pub fn aggregate_records(records: &[IntervalRecord], settings: &AggregationSettings, scope: SessionScope) -> Option<WorkSession> {
    let first = records.first()?;
    let last = records.last()?;

    let start = round_timestamp(first.start, settings.rounding_interval);
    let stop = round_timestamp(last.stop, settings.rounding_interval);

    let mut overlapping = false;
    let raw_break_minutes: f64 = records
        .windows(2)
        .map(|pair| {
            let gap = pair[1].start - pair[0].stop;
            overlapping |= gap.num_milliseconds() < 0;
            gap.num_milliseconds() as f64 / settings.ms_per_minute
        })
        .sum();

    if overlapping {
        warn!(date = %start.date(), break_minutes = raw_break_minutes, "overlapping intervals reduce the break time");
    }

    let break_minutes = round_minute_count(raw_break_minutes, settings.rounding_interval);
    let work_minutes = (stop - start).num_minutes() - break_minutes;

    Some(WorkSession {
        date: start.date(),
        start,
        stop,
        break_minutes,
        work_minutes,
        scope,
    })
}

/// Turns every bucket into sessions, in day order and, within a day, in
/// project order.
///
/// In per-project mode each project id must resolve against `projects`;
/// an unknown id fails the whole aggregation.
pub fn aggregate_buckets(buckets: &DayBuckets, settings: &AggregationSettings, projects: &ProjectIndex) -> Result<Vec<WorkSession>, ReportError> {
    let mut sessions = Vec::new();

    for (key, bucket) in buckets.iter() {
        match bucket {
            DayBucket::Flat(records) => {
                sessions.extend(aggregate_records(records, settings, SessionScope::Day));
            }
            DayBucket::ByProject(by_project) => {
                for (project_id, records) in by_project {
                    let project = match project_id {
                        Some(id) => Some(projects.get(*id).cloned().ok_or(ReportError::UnresolvedProject(*id))?),
                        None => None,
                    };
                    sessions.extend(aggregate_records(records, settings, SessionScope::Project(project)));
                }
            }
        }
        debug!(?key, "aggregated bucket");
    }

    Ok(sessions)
}
