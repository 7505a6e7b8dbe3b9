//! Tracked intervals and the projects they belong to.
//!
//! These are the raw inputs of the aggregation engine. Timestamps are kept as
//! local wall-clock values: grouping by calendar day and rounding to the
//! quarter hour both happen in the user's local time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a project in the time-tracking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProjectId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProjectId)
    }
}

/// One tracked span of time.
///
/// Records are never mutated after they have been fetched. The source is
/// responsible for only handing out records with `start <= stop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalRecord {
    /// Local wall-clock start of the span
    pub start: NaiveDateTime,
    /// Local wall-clock end of the span
    pub stop: NaiveDateTime,
    /// Owning project, `None` for entries tracked without a project
    pub project_id: Option<ProjectId>,
}

impl IntervalRecord {
    pub fn new(start: NaiveDateTime, stop: NaiveDateTime, project_id: Option<ProjectId>) -> Self {
        Self { start, stop, project_id }
    }
}

/// Project metadata as far as the report needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
}

/// Lookup table over the projects fetched for a run.
#[derive(Debug, Clone, Default)]
pub struct ProjectIndex {
    projects: HashMap<ProjectId, Project>,
}

impl ProjectIndex {
    pub fn new(projects: impl IntoIterator<Item = Project>) -> Self {
        Self {
            projects: projects.into_iter().map(|project| (project.id, project)).collect(),
        }
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
