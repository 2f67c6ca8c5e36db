mod commands;
mod demo;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rtam_core::{LogLevel, Outcome};
use rtam_runtime::{Manager, RuntimeConfig};
use tracing::warn;
use tracing_subscriber::FmtSubscriber;

use commands::Commands;

/// rtam Command Line Interface
///
/// Boots the bundled demo firmware image, autostart included, and runs one
/// lifecycle command against it.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Path to a JSON or TOML configuration file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[clap(long, global = true)]
    log_level: Option<LogLevel>,

    #[clap(subcommand)]
    command: Commands,
}

fn init_tracing(level: LogLevel) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level.as_tracing_level())
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(config: RuntimeConfig, command: Commands) -> Result<Outcome> {
    let manager =
        Arc::new(Manager::init(&demo::IMAGE, config).context("Failed to initialize manager")?);
    demo::attach(&manager);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = commands::execute(&manager, command, &mut out)?;
    out.flush()?;

    let remaining = manager.shutdown();
    if !remaining.is_empty() {
        warn!("Applications left running: {}", remaining.join(", "));
    }

    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RuntimeConfig::load(cli.config.as_deref()).await?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_tracing(config.log_level);

    let command = cli.command;
    let outcome = tokio::task::spawn_blocking(move || run(config, command))
        .await
        .context("Command task panicked")??;

    if !outcome.is_ok() {
        std::process::exit(1);
    }

    Ok(())
}
