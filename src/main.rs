use std::process::ExitCode;
use worklog::commands::Cli;
use worklog::libs::messages::{macros::init_tracing, Message};
use worklog::msg_error;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine, the environment may be set otherwise
    let _ = dotenv::dotenv();
    init_tracing();

    match Cli::menu().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            msg_error!(Message::CommandFailed(format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}
