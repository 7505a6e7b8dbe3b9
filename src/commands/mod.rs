pub mod init;
pub mod projects;
pub mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Build a timesheet report from tracked time entries")]
    Report(report::ReportArgs),
    #[command(about = "List the projects tracked in a date range")]
    Projects(projects::ProjectsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::Report(args) => report::cmd(args).await,
            Commands::Projects(args) => projects::cmd(args).await,
        }
    }
}
