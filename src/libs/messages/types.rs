#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String), // path
    ConfigModuleToggl,
    ConfigModuleReport,
    PromptSelectModules,
    PromptApiUrl,
    PromptApiToken,
    PromptRoundingInterval,
    PromptDateFormat,
    PromptOutputDir,
    RoundingIntervalNotPositive,

    // === REPORT MESSAGES ===
    FetchingEntries(String, String), // from, to
    FetchingProjects,
    ReportSaved(String), // path
    ReportEmpty(String), // range
    SessionsHeader(String), // range
    ProjectTotal(String, String), // hours, project

    // === PROJECT MESSAGES ===
    ProjectsHeader(String), // range
    NoProjectsFound,

    // === ERRORS ===
    CommandFailed(String), // error chain
}
