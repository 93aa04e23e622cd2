//! truthwatch CLI
//!
//! Interactive menu over the local post archive.

use std::path::PathBuf;

use clap::Parser;
use truthwatch::{
    app::App, capabilities::Capabilities, error::Result, models::Config, services::FeedClient,
};

/// truthwatch - Post Feed Archiver
#[derive(Parser, Debug)]
#[command(
    name = "truthwatch",
    version,
    about = "Archive, search and analyze a public account's posts"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "truthwatch.toml")]
    config: PathBuf,

    /// Directory holding the data files (overrides the config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(dir) = cli.data_dir {
        config.paths.data_dir = dir;
    }
    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    log::info!("Data directory: {}", config.paths.data_dir.display());

    let caps = Capabilities::detect();
    let client = FeedClient::new(&config.fetch)?;
    let app = App::new(config, client, caps)?;
    app.run().await?;

    println!("Goodbye!");
    Ok(())
}
