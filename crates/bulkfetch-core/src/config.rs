use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::downloader::HttpOptions;
use crate::retry::{Backoff, RetryPolicy};

/// Backoff shape between failed attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    #[default]
    Fixed,
    Exponential,
}

/// Retry policy parameters (`[retry]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per task (including the first).
    pub max_attempts: u32,
    /// Delay in seconds between failed attempts (base delay for exponential).
    pub delay_secs: f64,
    /// "fixed" (default) or "exponential".
    #[serde(default)]
    pub backoff: BackoffKind,
    /// Upper bound on exponential backoff delay in seconds.
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,
}

fn default_max_delay_secs() -> u64 {
    60
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_secs: 5.0,
            backoff: BackoffKind::Fixed,
            max_delay_secs: default_max_delay_secs(),
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        let delay = Duration::from_secs_f64(self.delay_secs.max(0.0));
        let backoff = match self.backoff {
            BackoffKind::Fixed => Backoff::Fixed,
            BackoffKind::Exponential => Backoff::Exponential {
                max_delay: Duration::from_secs(self.max_delay_secs),
            },
        };
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay,
            backoff,
        }
    }
}

/// libcurl transfer settings (`[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Abort a transfer slower than this many bytes/s for `low_speed_time_secs`.
    pub low_speed_limit_bytes: u32,
    pub low_speed_time_secs: u64,
    pub follow_redirects: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            follow_redirects: true,
        }
    }
}

impl HttpConfig {
    pub fn to_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            low_speed_limit: self.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(self.low_speed_time_secs),
            follow_redirects: self.follow_redirects,
        }
    }
}

/// Global configuration loaded from `~/.config/bulkfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Number of worker slots (maximum downloads in flight).
    pub max_concurrent: usize,
    /// Capacity of the recent-completions ring.
    pub recent_capacity: usize,
    /// Dashboard sampling interval in milliseconds.
    pub sample_interval_ms: u64,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 10,
            recent_capacity: 10,
            sample_interval_ms: 1000,
            retry: RetryConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl BulkConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    /// Rejects values the scheduler cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent == 0 {
            anyhow::bail!("max_concurrent must be at least 1");
        }
        if self.recent_capacity == 0 {
            anyhow::bail!("recent_capacity must be at least 1");
        }
        if self.sample_interval_ms == 0 {
            anyhow::bail!("sample_interval_ms must be at least 1");
        }
        if self.retry.max_attempts == 0 {
            anyhow::bail!("retry.max_attempts must be at least 1");
        }
        if !self.retry.delay_secs.is_finite() || self.retry.delay_secs < 0.0 {
            anyhow::bail!("retry.delay_secs must be a non-negative number");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bulkfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BulkConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BulkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load and validate configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<BulkConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: BulkConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}
