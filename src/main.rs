//! `tracksmartin` command-line entry point.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing::{debug, error, info, warn};

use tracksmartin::TracksError;
use tracksmartin::utils::CancelHandle;

use cli::Cli;

const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = cli::load_env_file(None);
    let cli = Cli::parse();

    let _log_guard = match cli::init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".bright_red().bold());
            return ExitCode::FAILURE;
        }
    };

    match env_file {
        Ok(Some(path)) => debug!(path = %path.display(), "Loaded environment file"),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Ignoring unreadable .env file"),
    }

    let cancel = CancelHandle::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling");
            on_signal.cancel();
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(i32::from(EXIT_CANCELLED));
            }
        }
    });

    match cli::run(cli, cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<TracksError>() {
        Some(err) if err.is_cancelled() => {
            eprintln!("\n{}", "Cancelled.".yellow());
            return ExitCode::from(EXIT_CANCELLED);
        }
        Some(TracksError::ConfigurationError(_)) => {
            eprintln!("{} {e:#}", "Error:".bright_red().bold());
            eprintln!(
                "{}",
                "Set SUNO_API_KEY and OPENAI_KEY, or pass --suno-api-key/--openai-api-key.".dimmed()
            );
        }
        Some(TracksError::PollTimeout { task_id, .. }) => {
            eprintln!("{} {e:#}", "Error:".bright_red().bold());
            eprintln!(
                "{}",
                format!("The task may still finish: tracksmartin wait {task_id}").dimmed()
            );
        }
        _ => eprintln!("{} {e:#}", "Error:".bright_red().bold()),
    }
    error!(error = %format!("{e:#}"), "Command failed");
    ExitCode::FAILURE
}
