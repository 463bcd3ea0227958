use std::{fs::OpenOptions, sync::Mutex};

use anyhow::{Context, Result};
use tama_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr unless the config
/// names a file, which keeps them off the full-screen window.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {:?}", path))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}
