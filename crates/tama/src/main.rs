mod cli;
mod logging;
mod prompt;
mod window;

use anyhow::Result;
use clap::Parser;
use tama_core::config::ConfigOrigin;
use tracing::{info, warn};

use cli::{Cli, Frontend};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    logging::init(&config.logging)?;

    if let ConfigOrigin::Example(path) = &config.origin {
        warn!("Using example configuration at {:?}", path);
    }

    let frontend = cli.frontend();
    info!(?frontend, save = ?config.storage.save_path, "Starting tama");

    match frontend {
        Frontend::Prompt => prompt::run(config).await,
        Frontend::Window => window::run(config).await,
    }
}
