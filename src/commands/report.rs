//! Report command: fetch, aggregate and write a timesheet.
//!
//! ## Examples
//!
//! ```bash
//! # Current month, one session per day
//! worklog report
//!
//! # March 2020, only project 123, written to ./out/2020-03-01_2020-03-31_123.csv
//! worklog report --month 2020-03 --project 123 --output out
//!
//! # One session per project and day with project totals, shown as a table
//! worklog report --from 2020-03-01 --to 2020-03-15 --per-project --show
//! ```

use crate::{
    api::Toggl,
    libs::{
        config::Config,
        formatter::format_duration,
        interval::ProjectId,
        messages::Message,
        output::ReportFile,
        report::project_label,
        settings::{DateRange, ReportRequest, ReportSettings},
        timesheet,
        view::View,
    },
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

/// Date range selection shared by the commands that query entries.
#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Month to report as YYYY-MM
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    month: Option<String>,

    /// First day of the range (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,
}

impl RangeArgs {
    /// The selected range, `None` when neither a month nor days were given.
    pub fn range(&self) -> Result<Option<DateRange>> {
        match (&self.month, self.from, self.to) {
            (Some(month), _, _) => Ok(Some(DateRange::parse_month(month)?)),
            (None, Some(from), Some(to)) => Ok(Some(DateRange::new(from, to)?)),
            (None, None, None) => Ok(None),
            _ => bail!("--from and --to must be given together"),
        }
    }
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    range: RangeArgs,

    /// Only include entries of this project (repeatable)
    #[arg(short, long = "project", value_name = "ID")]
    projects: Vec<ProjectId>,

    /// One session per project and day, with project totals
    #[arg(long)]
    per_project: bool,

    /// Add the totalWorkTime, gleitzeit and project columns
    #[arg(long)]
    extended: bool,

    /// Group by full date instead of day of month
    #[arg(long)]
    full_date: bool,

    /// Directory to write the report to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the sessions as a table
    #[arg(long)]
    show: bool,
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let config = Config::load()?;
    let settings = ReportSettings::resolve(
        &config,
        ReportRequest {
            range: args.range.range()?,
            project_ids: args.projects,
            per_project: args.per_project,
            extended: args.extended,
            full_date: args.full_date,
            output_dir: args.output,
        },
    )?;

    msg_info!(Message::FetchingEntries(settings.range.from.to_string(), settings.range.to.to_string()));

    let toggl = Toggl::new(&settings.api);
    let sheet = timesheet::build(&toggl, &settings).await?;

    if sheet.sessions.is_empty() {
        msg_warning!(Message::ReportEmpty(settings.range.file_stem()));
    }

    if args.show {
        msg_print!(Message::SessionsHeader(settings.range.file_stem()), true);
        View::sessions(&sheet.sessions, &settings.names);
        for total in sheet.totals.iter().flatten() {
            msg_print!(Message::ProjectTotal(
                format_duration(total.minutes),
                project_label(total.project.as_ref(), &settings.names)
            ));
        }
    }

    let file = ReportFile::new(&settings.output_dir, &settings.file_name());
    let path = file.write(&sheet.content)?;
    msg_success!(Message::ReportSaved(path.display().to_string()));

    Ok(())
}
