//! Partitioning of tracked intervals into day buckets.
//!
//! Every bucket becomes exactly one work session in the report. In per-day
//! mode a bucket is the flat list of a day's intervals; in per-project mode
//! it is split further by project so each project gets its own session.
//!
//! ## Grouping keys
//!
//! The default key is the day of the month of each interval's start. Two
//! dates with the same day number in different months end up in the same
//! bucket, which is only correct for ranges within a single month. The
//! [`GroupingKey::CalendarDate`] key keeps full dates apart and is the one to
//! use for longer ranges.

use super::interval::{IntervalRecord, ProjectId};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet};

/// Which intervals take part in a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    /// Keep every interval, with or without a project
    #[default]
    All,
    /// Keep only intervals booked on one of these projects
    Only(BTreeSet<ProjectId>),
}

impl ProjectFilter {
    /// Builds a filter from a list of ids; an empty list keeps everything.
    pub fn from_ids(ids: impl IntoIterator<Item = ProjectId>) -> Self {
        let ids: BTreeSet<ProjectId> = ids.into_iter().collect();
        if ids.is_empty() {
            Self::All
        } else {
            Self::Only(ids)
        }
    }

    pub fn accepts(&self, project_id: Option<ProjectId>) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => project_id.is_some_and(|id| ids.contains(&id)),
        }
    }

    /// The selected project when exactly one is configured.
    pub fn single(&self) -> Option<ProjectId> {
        match self {
            Self::Only(ids) if ids.len() == 1 => ids.iter().next().copied(),
            _ => None,
        }
    }
}

/// How the bucket of an interval is derived from its start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupingKey {
    #[default]
    DayOfMonth,
    CalendarDate,
}

impl GroupingKey {
    pub fn key_for(self, timestamp: &NaiveDateTime) -> DayKey {
        match self {
            Self::DayOfMonth => DayKey::DayOfMonth(timestamp.day()),
            Self::CalendarDate => DayKey::Date(timestamp.date()),
        }
    }
}

/// Bucket key. A single grouping pass only produces one of the variants,
/// so ordering between them never matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayKey {
    DayOfMonth(u32),
    Date(NaiveDate),
}

/// Whether a day is reported as a whole or once per project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupingMode {
    #[default]
    PerDay,
    PerProject,
}

/// Intervals of one day, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayBucket {
    Flat(Vec<IntervalRecord>),
    ByProject(BTreeMap<Option<ProjectId>, Vec<IntervalRecord>>),
}

impl DayBucket {
    fn empty(mode: GroupingMode) -> Self {
        match mode {
            GroupingMode::PerDay => Self::Flat(Vec::new()),
            GroupingMode::PerProject => Self::ByProject(BTreeMap::new()),
        }
    }

    fn push(&mut self, record: IntervalRecord) {
        match self {
            Self::Flat(records) => records.push(record),
            Self::ByProject(projects) => projects.entry(record.project_id).or_default().push(record),
        }
    }

    /// All intervals of the bucket, project by project in per-project mode.
    pub fn records(&self) -> Vec<&IntervalRecord> {
        match self {
            Self::Flat(records) => records.iter().collect(),
            Self::ByProject(projects) => projects.values().flatten().collect(),
        }
    }
}

/// Options of a grouping pass.
#[derive(Debug, Clone, Default)]
pub struct GroupOptions {
    pub filter: ProjectFilter,
    pub mode: GroupingMode,
    pub key: GroupingKey,
}

/// Result of a grouping pass, ordered by day key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBuckets {
    buckets: BTreeMap<DayKey, DayBucket>,
}

impl DayBuckets {
    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &DayBucket)> {
        self.buckets.iter()
    }

    pub fn get(&self, key: &DayKey) -> Option<&DayBucket> {
        self.buckets.get(key)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Distinct projects referenced by any bucket, in ascending order.
    pub fn project_ids(&self) -> Vec<ProjectId> {
        self.buckets
            .values()
            .flat_map(|bucket| bucket.records())
            .filter_map(|record| record.project_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Groups intervals into day buckets.
///
/// Intervals rejected by the filter are dropped. Everything else lands in
/// exactly one bucket, keeping the order in which the source returned it.
pub fn group_records(records: Vec<IntervalRecord>, options: &GroupOptions) -> DayBuckets {
    let mut buckets: BTreeMap<DayKey, DayBucket> = BTreeMap::new();

    for record in records {
        if !options.filter.accepts(record.project_id) {
            continue;
        }

        let key = options.key.key_for(&record.start);
        buckets.entry(key).or_insert_with(|| DayBucket::empty(options.mode)).push(record);
    }

    DayBuckets { buckets }
}
