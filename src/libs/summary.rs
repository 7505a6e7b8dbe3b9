use crate::libs::interval::{Project, ProjectId};
use crate::libs::session::{SessionScope, WorkSession};
use std::collections::BTreeMap;

/// Summed work time of one project over the whole report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTotal {
    /// `None` collects sessions tracked without a project
    pub project: Option<Project>,
    pub minutes: i64,
}

impl ProjectTotal {
    pub fn project_id(&self) -> Option<ProjectId> {
        self.project.as_ref().map(|project| project.id)
    }
}

pub trait ProjectTotals {
    /// Sums work minutes per project, ordered by project id. Sessions that
    /// cover a whole day are not attributed to any project and are skipped.
    fn project_totals(&self) -> Vec<ProjectTotal>;
}

impl ProjectTotals for [WorkSession] {
    fn project_totals(&self) -> Vec<ProjectTotal> {
        let mut totals: BTreeMap<Option<ProjectId>, ProjectTotal> = BTreeMap::new();

        for session in self {
            let SessionScope::Project(project) = &session.scope else {
                continue;
            };

            totals
                .entry(project.as_ref().map(|p| p.id))
                .or_insert_with(|| ProjectTotal {
                    project: project.clone(),
                    minutes: 0,
                })
                .minutes += session.work_minutes;
        }

        totals.into_values().collect()
    }
}
