mod terminal;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use pathfinder_engine::ClientSettings;
use pathfinder_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "pathfinder", about = "Pick known and target concepts, get a learning path")]
struct Cli {
    /// Base URL of the server API, including the `/api` prefix.
    #[arg(long, env = "PATHFINDER_API_BASE", default_value = "http://localhost:5000/api")]
    api_base: String,

    #[arg(long, default_value_t = 10)]
    connect_timeout_secs: u64,

    /// Deadline for each request; the loading indicator never outlives it.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Logs go to a file so they do not interleave with the interface.
    #[arg(long, default_value = "pathfinder.log")]
    log_file: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    pathfinder_logging::initialize(LogDestination::File(cli.log_file.clone()), cli.log_level);

    let settings = ClientSettings {
        base_url: cli.api_base,
        connect_timeout: Duration::from_secs(cli.connect_timeout_secs),
        request_timeout: Duration::from_secs(cli.timeout_secs),
        ..ClientSettings::default()
    };
    terminal::run_app(settings).context("terminal front end failed")
}
