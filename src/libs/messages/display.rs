//! Display implementation for worklog messages.
//!
//! All user-facing text is defined here, so commands only ever pick a
//! [`Message`] variant and hand it to one of the `msg_*!` macros.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigModuleToggl => "Toggl settings".to_string(),
            Message::ConfigModuleReport => "Report settings".to_string(),
            Message::PromptSelectModules => "Select the settings to configure".to_string(),
            Message::PromptApiUrl => "Enter the Toggl API URL".to_string(),
            Message::PromptApiToken => "Enter your Toggl API token (empty keeps the stored one)".to_string(),
            Message::PromptRoundingInterval => "Round times to how many minutes".to_string(),
            Message::PromptDateFormat => "Date format of the report (strftime)".to_string(),
            Message::PromptOutputDir => "Directory for report files".to_string(),
            Message::RoundingIntervalNotPositive => "The rounding interval must be at least one minute".to_string(),

            // === REPORT MESSAGES ===
            Message::FetchingEntries(from, to) => format!("Fetching time entries from {} to {}", from, to),
            Message::FetchingProjects => "Fetching projects".to_string(),
            Message::ReportSaved(path) => format!("Your report was successfully saved to {}", path),
            Message::ReportEmpty(range) => format!("No time entries found for {}; the report only has a header", range),
            Message::SessionsHeader(range) => format!("Work sessions {}", range),
            Message::ProjectTotal(hours, project) => format!("{}h {}", hours, project),

            // === PROJECT MESSAGES ===
            Message::ProjectsHeader(range) => format!("Projects tracked {}", range),
            Message::NoProjectsFound => "No projects found in this range".to_string(),

            // === ERRORS ===
            Message::CommandFailed(error) => format!("Error: {}", error),
        };

        write!(f, "{}", text)
    }
}
