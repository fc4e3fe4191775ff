//! Command line flags.

use std::path::PathBuf;

use clap::Parser;
use tally_core::error::Result;

use crate::config::{self, TallyConfig};

#[derive(Debug, Parser)]
#[command(name = "tally-server", about = "Demo HTTP service exposing request metrics")]
pub struct Cli {
    /// The socket to bind to [default: :8080]
    #[arg(long)]
    pub bind: Option<String>,

    /// Optional YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load the config file if one was given, then apply flag overrides.
    pub fn resolve_config(&self) -> Result<TallyConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_file(path)?,
            None => TallyConfig::default(),
        };
        if let Some(bind) = &self.bind {
            cfg.server.bind = bind.clone();
            cfg.validate()?;
        }
        Ok(cfg)
    }
}
