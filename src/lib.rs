//! # Worklog - tracked time to timesheet
//!
//! A command-line utility that fetches time entries from Toggl, folds them
//! into one rounded work session per day (or per day and project) and writes
//! a semicolon-delimited report ready to paste into a timesheet.
//!
//! ## Features
//!
//! - **Rounding**: session boundaries and break totals snap to a configurable
//!   interval (15 minutes by default)
//! - **Breaks**: gaps between consecutive entries of a day become break time
//! - **Per-Project Reports**: one session per project and day, with totals
//! - **Decimal Hours**: durations are written as fractional hours with a
//!   decimal comma
//!
//! ## Usage
//!
//! ```rust,no_run
//! use worklog::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
