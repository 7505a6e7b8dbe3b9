use super::formatter::format_duration;
use super::interval::Project;
use super::report::{project_label, NameOverrides};
use super::session::{SessionScope, WorkSession};
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn sessions(sessions: &[WorkSession], names: &NameOverrides) {
        let mut table = Table::new();

        table.add_row(row!["DATE", "START", "STOP", "BREAK (H)", "WORK (H)", "PROJECT"]);
        for session in sessions {
            let project = match &session.scope {
                SessionScope::Day => String::new(),
                SessionScope::Project(project) => project_label(project.as_ref(), names),
            };
            table.add_row(row![
                session.date.format("%Y-%m-%d"),
                session.start.format("%H:%M"),
                session.stop.format("%H:%M"),
                format_duration(session.break_minutes),
                format_duration(session.work_minutes),
                project
            ]);
        }
        table.printstd();
    }

    pub fn projects(projects: &[Project], names: &NameOverrides) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "REPORTED AS"]);
        for project in projects {
            table.add_row(row![project.id, project.name, project_label(Some(project), names)]);
        }
        table.printstd();
    }
}
