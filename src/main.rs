use anyhow::{Context, Result};
use clap::Parser;
use fisherman::api::{ApiClient, Error};
use fisherman::cli::{Args, LogLevel};
use fisherman::commands;
use fisherman::config::CredentialStore;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::fmt::writer::MakeWriterExt;

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("fisherman started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("fisherman").join("fisherman.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".fisherman").join("fisherman.log");
    }
    PathBuf::from("fisherman.log")
}

async fn run(args: &Args) -> Result<String, Error> {
    let store = match &args.config {
        Some(path) => CredentialStore::new(path),
        None => CredentialStore::from_default_path()?,
    };

    if let Some(output) = commands::execute_local(&args.command, &store) {
        return output;
    }

    let mut credentials = store.load()?.clone();
    if let Some(secs) = args.timeout {
        credentials.timeout_secs = Some(secs);
    }

    let client = ApiClient::new(&credentials)?;
    commands::execute(&args.command, &client).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match setup_logging(args.log_level) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{:?}", err);
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
