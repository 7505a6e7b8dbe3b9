//! Resolved, validated settings of a single report run.
//!
//! [`ReportSettings`] is built once from the stored configuration (with its
//! environment overrides applied) and the command-line request. Everything
//! downstream reads from this value; nothing inside the aggregation engine
//! looks at the environment.

use super::config::{Config, ReportConfig, DEFAULT_API_URL};
use super::error::ConfigError;
use super::grouping::{GroupOptions, GroupingKey, GroupingMode, ProjectFilter};
use super::interval::ProjectId;
use super::report::{NameOverrides, ReportLayout};
use super::session::AggregationSettings;
use crate::api::TogglConfig;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, Months, NaiveDate, TimeZone};
use std::fmt::Write;
use std::path::PathBuf;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ConfigError> {
        if to < from {
            return Err(ConfigError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// First to last day of a month.
    pub fn month(year: i32, month: u32) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidMonth(format!("{year:04}-{month:02}"));

        let from = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let to = from
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self { from, to })
    }

    /// Parses `YYYY-MM`.
    pub fn parse_month(month: &str) -> Result<Self, ConfigError> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
            .map_err(|_| ConfigError::InvalidMonth(month.to_string()))?;
        Self::month(first.year(), first.month())
    }

    pub fn current_month() -> Result<Self, ConfigError> {
        let today = Local::now().date_naive();
        Self::month(today.year(), today.month())
    }

    /// Local midnight of the first day and of the day after the last one.
    pub fn query_bounds(&self) -> Result<(DateTime<Local>, DateTime<Local>), ConfigError> {
        let end_day = self.to.succ_opt().ok_or(ConfigError::InvalidRange { from: self.from, to: self.to })?;
        Ok((local_midnight(self.from)?, local_midnight(end_day)?))
    }

    /// `<from>_<to>` with ISO dates.
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.from.format("%Y-%m-%d"), self.to.format("%Y-%m-%d"))
    }
}

fn local_midnight(date: NaiveDate) -> Result<DateTime<Local>, ConfigError> {
    Local
        .from_local_datetime(&date.and_time(chrono::NaiveTime::MIN))
        .earliest()
        .ok_or(ConfigError::AmbiguousMidnight(date))
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub range: Option<DateRange>,
    pub project_ids: Vec<ProjectId>,
    pub per_project: bool,
    pub extended: bool,
    pub full_date: bool,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub api: TogglConfig,
    pub range: DateRange,
    pub rounding_interval: u32,
    pub ms_per_minute: f64,
    pub filter: ProjectFilter,
    pub mode: GroupingMode,
    pub key: GroupingKey,
    pub layout: ReportLayout,
    pub date_format: String,
    pub names: NameOverrides,
    pub output_dir: PathBuf,
}

impl ReportSettings {
    /// Validates the configuration against the request.
    ///
    /// Fails when the API credentials are missing, the rounding interval or
    /// conversion factor is not positive, the date format does not parse,
    /// or a per-project report has no explicit date range.
    pub fn resolve(config: &Config, request: ReportRequest) -> Result<Self, ConfigError> {
        let api = config.toggl.clone().ok_or(ConfigError::MissingToken)?;
        if api.api_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        let api = TogglConfig {
            api_url: if api.api_url.trim().is_empty() {
                DEFAULT_API_URL.to_string()
            } else {
                api.api_url
            },
            ..api
        };

        let report = config.report.clone().unwrap_or_default();

        let rounding_interval = u32::try_from(report.rounding_interval)
            .ok()
            .filter(|interval| *interval > 0)
            .ok_or(ConfigError::InvalidRoundingInterval(report.rounding_interval))?;

        if !(report.ms_per_minute.is_finite() && report.ms_per_minute > 0.0) {
            return Err(ConfigError::InvalidConversionFactor(report.ms_per_minute));
        }

        validate_date_format(&report.date_format)?;

        let mode = if request.per_project {
            GroupingMode::PerProject
        } else {
            GroupingMode::PerDay
        };

        let range = match (request.range, mode) {
            (Some(range), _) => range,
            (None, GroupingMode::PerProject) => return Err(ConfigError::MissingRange),
            (None, GroupingMode::PerDay) => DateRange::current_month()?,
        };

        let project_ids = if request.project_ids.is_empty() {
            report.project_ids.iter().copied().map(ProjectId).collect()
        } else {
            request.project_ids
        };

        Ok(Self {
            api,
            range,
            rounding_interval,
            ms_per_minute: report.ms_per_minute,
            filter: ProjectFilter::from_ids(project_ids),
            mode,
            key: if request.full_date {
                GroupingKey::CalendarDate
            } else {
                GroupingKey::DayOfMonth
            },
            layout: if request.extended || request.per_project {
                ReportLayout::Extended
            } else {
                ReportLayout::Basic
            },
            names: names_from(&report),
            date_format: report.date_format,
            output_dir: request.output_dir.unwrap_or_else(|| PathBuf::from(report.output_dir)),
        })
    }

    pub fn grouping(&self) -> GroupOptions {
        GroupOptions {
            filter: self.filter.clone(),
            mode: self.mode,
            key: self.key,
        }
    }

    pub fn aggregation(&self) -> AggregationSettings {
        AggregationSettings {
            rounding_interval: self.rounding_interval,
            ms_per_minute: self.ms_per_minute,
        }
    }

    /// `<from>_<to>[_<projectId>].csv`, the project id only when exactly one
    /// project is selected.
    pub fn file_name(&self) -> String {
        match self.filter.single() {
            Some(project_id) => format!("{}_{}.csv", self.range.file_stem(), project_id),
            None => format!("{}.csv", self.range.file_stem()),
        }
    }
}

fn names_from(report: &ReportConfig) -> NameOverrides {
    report.project_names.iter().map(|(id, name)| (ProjectId(*id), name.clone())).collect()
}

/// Rejects patterns that do not parse or that need more than a date
/// (`%H`, `%M`, `%z`, ...), which a date alone cannot render.
fn validate_date_format(format: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidDateFormat(format.to_string());

    if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut sample = String::new();
    write!(sample, "{}", NaiveDate::MIN.format(format)).map_err(|_| invalid())?;
    Ok(())
}
