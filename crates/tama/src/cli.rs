use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tama_core::{
    RestorePolicy,
    config::{AppConfig, Pacing, check_decay_coefficient},
};

#[derive(Parser)]
#[command(author, version, about = "A small pet that lives in your terminal")]
pub struct Cli {
    /// Config file to use instead of the default lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Where the pet is saved
    #[arg(long, global = true)]
    pub save_file: Option<PathBuf>,
    /// How fast needs decay
    #[arg(long, global = true, value_enum)]
    pub pacing: Option<PacingArg>,
    /// Decay per elapsed second; overrides --pacing
    #[arg(long, global = true, value_parser = parse_decay_coefficient)]
    pub decay_coefficient: Option<f64>,
    #[command(subcommand)]
    pub command: Option<Frontend>,
}

#[derive(Subcommand, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Frontend {
    /// Type commands at a prompt
    #[default]
    Prompt,
    /// Full-screen window with live stats
    Window,
}

impl Frontend {
    fn pacing(self) -> Pacing {
        match self {
            Frontend::Prompt => Pacing::Relaxed,
            Frontend::Window => Pacing::Demo,
        }
    }

    fn restore(self) -> RestorePolicy {
        match self {
            Frontend::Prompt => RestorePolicy::Resume,
            Frontend::Window => RestorePolicy::Refresh,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacingArg {
    Relaxed,
    Demo,
}

impl From<PacingArg> for Pacing {
    fn from(arg: PacingArg) -> Self {
        match arg {
            PacingArg::Relaxed => Pacing::Relaxed,
            PacingArg::Demo => Pacing::Demo,
        }
    }
}

fn parse_decay_coefficient(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|err| format!("{err}"))?;
    check_decay_coefficient(value).map_err(|err| err.to_string())
}

impl Cli {
    pub fn frontend(&self) -> Frontend {
        self.command.unwrap_or_default()
    }

    /// Loads the config file, then layers command-line overrides and the
    /// front-end's own defaults on top.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let base = match &self.config {
            Some(path) => AppConfig::from_path(path)?,
            None => AppConfig::load()?,
        };
        let config = self.apply_overrides(base);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(path) = &self.save_file {
            config.storage.save_path = path.clone();
        }
        if let Some(pacing) = self.pacing {
            config.pet.pacing = Some(pacing.into());
        }
        if let Some(coefficient) = self.decay_coefficient {
            config.pet.decay_coefficient = Some(coefficient);
        }
        let frontend = self.frontend();
        config.with_frontend_defaults(frontend.pacing(), frontend.restore())
    }
}
