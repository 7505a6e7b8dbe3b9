//! Semicolon-delimited rendering of work sessions.
//!
//! ## Layouts
//!
//! The basic layout has six columns:
//!
//! ```text
//! date;startHours;startMinutes;stopHours;stopMinutes;breakTime
//! 2.3.2020;8;0;17;0;0,75
//! ```
//!
//! The extended layout adds `totalWorkTime;gleitzeit;project`. The
//! `gleitzeit` (flex time) column is kept empty; it only exists so the file
//! matches the spreadsheet it gets pasted into. Per-project reports always
//! use the extended layout and end with a blank line followed by one total
//! per project:
//!
//! ```text
//! 2.3.2020;8;0;12;0;0;4;;Backend
//! 2.3.2020;13;0;17;0;0;4;;Frontend
//!
//! 4h Backend
//! 4h Frontend
//! ```
//!
//! Every line, the header included, ends with a newline. A report without
//! sessions consists of the header line alone.

use super::error::{ConfigError, ReportError};
use super::formatter::format_duration;
use super::interval::{Project, ProjectId};
use super::session::{SessionScope, WorkSession};
use super::summary::ProjectTotal;
use chrono::Timelike;
use std::collections::HashMap;
use std::fmt::Write;

pub const BASIC_HEADER: [&str; 6] = ["date", "startHours", "startMinutes", "stopHours", "stopMinutes", "breakTime"];
pub const EXTENDED_COLUMNS: [&str; 3] = ["totalWorkTime", "gleitzeit", "project"];

/// Footer label for time tracked without a project.
pub const NO_PROJECT_LABEL: &str = "No project";

/// Column set of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportLayout {
    #[default]
    Basic,
    Extended,
}

impl ReportLayout {
    pub fn header(self) -> Vec<&'static str> {
        let mut header = BASIC_HEADER.to_vec();
        if self == Self::Extended {
            header.extend(EXTENDED_COLUMNS);
        }
        header
    }
}

/// Display names that replace the names stored in the tracking service.
pub type NameOverrides = HashMap<ProjectId, String>;

/// Resolves the name shown for a project, preferring the override table.
pub fn project_label(project: Option<&Project>, names: &NameOverrides) -> String {
    match project {
        Some(project) => names.get(&project.id).cloned().unwrap_or_else(|| project.name.clone()),
        None => NO_PROJECT_LABEL.to_string(),
    }
}

pub struct ReportRenderer<'a> {
    layout: ReportLayout,
    date_format: &'a str,
    names: &'a NameOverrides,
}

impl<'a> ReportRenderer<'a> {
    /// `date_format` is a strftime pattern. Settings resolution rejects
    /// patterns a date cannot render; if one slips through, `render` fails
    /// with [`ConfigError::InvalidDateFormat`].
    pub fn new(layout: ReportLayout, date_format: &'a str, names: &'a NameOverrides) -> Self {
        Self { layout, date_format, names }
    }

    /// Renders the sessions, followed by the project totals when given.
    pub fn render(&self, sessions: &[WorkSession], totals: Option<&[ProjectTotal]>) -> Result<String, ReportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(false)
            .from_writer(Vec::new());

        writer.write_record(self.layout.header())?;
        for session in sessions {
            writer.write_record(self.row(session)?)?;
        }

        let bytes = writer.into_inner().map_err(|e| ReportError::Csv(e.into_error().into()))?;
        let mut report = String::from_utf8(bytes)?;

        if let Some(totals) = totals.filter(|totals| !totals.is_empty()) {
            report.push('\n');
            for total in totals {
                report.push_str(&self.footer_line(total));
                report.push('\n');
            }
        }

        Ok(report)
    }

    fn row(&self, session: &WorkSession) -> Result<Vec<String>, ReportError> {
        let mut date = String::new();
        write!(date, "{}", session.date.format(self.date_format))
            .map_err(|_| ConfigError::InvalidDateFormat(self.date_format.to_string()))?;

        let mut row = vec![
            date,
            session.start.hour().to_string(),
            session.start.minute().to_string(),
            session.stop.hour().to_string(),
            session.stop.minute().to_string(),
            format_duration(session.break_minutes),
        ];

        if self.layout == ReportLayout::Extended {
            let project = match &session.scope {
                SessionScope::Day => String::new(),
                SessionScope::Project(project) => project_label(project.as_ref(), self.names),
            };
            row.extend([format_duration(session.work_minutes), String::new(), project]);
        }

        Ok(row)
    }

    fn footer_line(&self, total: &ProjectTotal) -> String {
        format!("{}h {}", format_duration(total.minutes), project_label(total.project.as_ref(), self.names))
    }
}
