/// ApplyTrack - job application tracker
use applytrack_cli::{build_tracker, execute, render, AppConfig, Cli};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "applytrack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let tracker = build_tracker(&config).await?;

    match execute(&tracker, cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{}", render::failure(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}
