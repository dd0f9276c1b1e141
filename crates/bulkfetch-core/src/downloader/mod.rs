//! One download attempt for one task on one slot.
//!
//! skip check → HEAD probe → publish progress → stream to `<final>_` →
//! rename onto `<final>` → record in the recent ring. Failures leave the
//! slot's record as last published and touch neither counters nor the ring.

mod error;
mod fetch;

pub use error::{AttemptError, CopyError, FetchError};

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::fetch_head;
use crate::progress::{progress_label, DownloadProgress, ProgressState};
use crate::task::DownloadTask;

use self::fetch::StreamError;

/// libcurl settings shared by the probe and the body request.
#[derive(Debug, Clone, Copy)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Abort when slower than this many bytes/s for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub follow_redirects: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            follow_redirects: true,
        }
    }
}

impl HttpOptions {
    pub(crate) fn apply(&self, easy: &mut curl::easy::Easy) -> Result<(), curl::Error> {
        easy.follow_location(self.follow_redirects)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.low_speed_limit(self.low_speed_limit)?;
        easy.low_speed_time(self.low_speed_time)?;
        easy.useragent(concat!("bulkfetch/", env!("CARGO_PKG_VERSION")))?;
        Ok(())
    }
}

/// How a successful attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The final path already existed; nothing was fetched.
    AlreadyPresent(PathBuf),
    /// The file was fetched and committed; absolute final path.
    Committed(PathBuf),
}

/// Executes attempts against a destination directory and the shared progress state.
#[derive(Debug)]
pub struct Downloader {
    dest_dir: PathBuf,
    http: HttpOptions,
    state: Arc<ProgressState>,
}

impl Downloader {
    pub fn new(dest_dir: impl Into<PathBuf>, http: HttpOptions, state: Arc<ProgressState>) -> Self {
        Self {
            dest_dir: dest_dir.into(),
            http,
            state,
        }
    }

    pub fn state(&self) -> &Arc<ProgressState> {
        &self.state
    }

    /// Runs one attempt of `task` on `slot`. Panics if `slot` is out of range.
    pub fn attempt(&self, task: &DownloadTask, slot: usize) -> Result<AttemptOutcome, AttemptError> {
        let final_path = task.final_path(&self.dest_dir);
        if final_path.exists() {
            tracing::debug!(url = task.url(), path = %final_path.display(), "already present, skipping");
            return Ok(AttemptOutcome::AlreadyPresent(final_path));
        }

        let size = fetch_head::probe(task.url(), &self.http).map_err(|source| {
            AttemptError::ProbeFailed {
                url: task.url().to_string(),
                source,
            }
        })?;

        let progress = self.state.slots().publish(
            slot,
            DownloadProgress::new(progress_label(task.url(), size), size),
        );

        let temp_path = task.temp_path(&self.dest_dir);
        let file = File::create(&temp_path).map_err(|source| AttemptError::CreateFailed {
            path: temp_path.clone(),
            source,
        })?;

        let received = {
            let stats = self.state.stats();
            let _streaming = stats.begin_streaming();
            fetch::stream_to_file(task.url(), file, &progress, stats, &self.http).map_err(
                |e| match e {
                    StreamError::Fetch(source) => AttemptError::FetchFailed {
                        url: task.url().to_string(),
                        source,
                    },
                    StreamError::Copy(source) => AttemptError::CopyFailed {
                        url: task.url().to_string(),
                        path: temp_path.clone(),
                        source,
                    },
                },
            )?
        };

        fs::rename(&temp_path, &final_path).map_err(|source| AttemptError::RenameFailed {
            from: temp_path.clone(),
            to: final_path.clone(),
            source,
        })?;

        let abs_path =
            std::path::absolute(&final_path).map_err(|source| AttemptError::PathResolutionFailed {
                path: final_path.clone(),
                source,
            })?;

        self.state.recent().push(abs_path.clone());
        tracing::debug!(url = task.url(), slot, bytes = received, path = %abs_path.display(), "committed");
        Ok(AttemptOutcome::Committed(abs_path))
    }
}
