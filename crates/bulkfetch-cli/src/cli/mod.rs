//! CLI for bulkfetch.

mod dashboard;
mod run;
mod view;

use anyhow::{Context, Result};
use bulkfetch_core::config::{self, BulkConfig};
use clap::Parser;
use std::path::PathBuf;

use run::run_downloads;

/// Top-level CLI: fetch every URL of a list into a directory.
#[derive(Debug, Parser)]
#[command(name = "bulkfetch")]
#[command(about = "bulkfetch: bounded parallel bulk HTTP downloader with a live dashboard", long_about = None)]
pub struct Cli {
    /// Text file with one URL per line.
    pub url_list: PathBuf,

    /// Directory the files are written to (created if missing).
    pub dest_dir: PathBuf,

    /// Maximum downloads in flight (overrides `max_concurrent`).
    #[arg(long, short = 'j', value_name = "N")]
    pub jobs: Option<usize>,

    /// Number of recent completions shown (overrides `recent_capacity`).
    #[arg(long, value_name = "N")]
    pub recent: Option<usize>,

    /// Print one status line per sample instead of the terminal dashboard.
    #[arg(long)]
    pub plain: bool,

    /// Read configuration from this file instead of the XDG config dir.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);
        run_downloads(&cfg, &cli.url_list, &cli.dest_dir, cli.plain).await
    }

    fn load_config(&self) -> Result<BulkConfig> {
        let cfg = match &self.config {
            Some(path) => config::load_from_path(path)
                .with_context(|| format!("invalid config {}", path.display()))?,
            None => config::load_or_init()?,
        };
        self.with_overrides(cfg)
    }

    /// Applies command-line overrides and re-validates.
    fn with_overrides(&self, mut cfg: BulkConfig) -> Result<BulkConfig> {
        if let Some(jobs) = self.jobs {
            cfg.max_concurrent = jobs;
        }
        if let Some(recent) = self.recent {
            cfg.recent_capacity = recent;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
