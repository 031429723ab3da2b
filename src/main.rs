use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use roi_tracker::cli::Cli;
use roi_tracker::config::load_settings;
use roi_tracker::dispatcher::dispatch_command;

fn main() -> Result<()> {
    // Initialize logging; stdout stays clean for report/JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let settings = load_settings()?;
    dispatch_command(cli.command, cli.json, &settings)
}
