use super::report::RangeArgs;
use crate::{
    api::{IntervalSource, Toggl},
    libs::{
        config::Config,
        grouping::{group_records, GroupOptions},
        messages::Message,
        settings::{ReportRequest, ReportSettings},
        view::View,
    },
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(flatten)]
    range: RangeArgs,
}

/// Lists every project that has entries in the range, with the name it
/// would get in a report.
pub async fn cmd(args: ProjectsArgs) -> Result<()> {
    let config = Config::load()?;
    let settings = ReportSettings::resolve(
        &config,
        ReportRequest {
            range: args.range.range()?,
            ..ReportRequest::default()
        },
    )?;

    let toggl = Toggl::new(&settings.api);
    let records = toggl.fetch_intervals(&settings.range).await?;
    let project_ids = group_records(records, &GroupOptions::default()).project_ids();

    if project_ids.is_empty() {
        msg_warning!(Message::NoProjectsFound);
        return Ok(());
    }

    msg_info!(Message::FetchingProjects);
    let projects = toggl.fetch_projects(&project_ids).await?;

    msg_print!(Message::ProjectsHeader(settings.range.file_stem()), true);
    View::projects(&projects, &settings.names);

    Ok(())
}
