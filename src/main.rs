use anyhow::Result;
use feedback_sentiment::{
    config,
    display::{DisplayState, TerminalNotifier},
    input::FeedbackLines,
    submitter::{FeedbackSubmitter, SubmissionOutcome},
};
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::Mutex;
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

async fn submit_and_print(submitter: &FeedbackSubmitter, input: &str) -> Result<()> {
    if let SubmissionOutcome::Rendered(_) = submitter.submit(input).await? {
        let display = submitter.display();
        print!("{}", display.lock().await);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))?,
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting feedback client with log level: {}", log_level);

    let submitter = FeedbackSubmitter::from_config(
        &config.service,
        Arc::new(TerminalNotifier),
        Arc::new(Mutex::new(DisplayState::new())),
    )?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return submit_and_print(&submitter, &args.join(" ")).await;
    }

    let mut lines = FeedbackLines::new(BufReader::new(tokio::io::stdin()));
    while let Some(line) = lines.next_line().await? {
        submit_and_print(&submitter, &line).await?;
    }

    info!("Input closed, exiting");
    Ok(())
}
