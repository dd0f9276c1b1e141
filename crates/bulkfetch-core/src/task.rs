//! Download tasks: an immutable URL and the file name derived from it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::url_model;

/// Suffix appended to the final path while a transfer is in progress.
pub const TEMP_SUFFIX: &str = "_";

/// One URL to fetch. Created at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    url: String,
    file_name: String,
}

impl DownloadTask {
    /// Returns `None` when the URL has no usable last path segment.
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        let file_name = url_model::derive_file_name(&url)?;
        Some(Self { url, file_name })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Committed location: `<dest>/<file name>`.
    pub fn final_path(&self, dest_dir: &Path) -> PathBuf {
        dest_dir.join(&self.file_name)
    }

    /// In-progress location: `<dest>/<file name>_`.
    pub fn temp_path(&self, dest_dir: &Path) -> PathBuf {
        let mut o: OsString = self.final_path(dest_dir).into_os_string();
        o.push(TEMP_SUFFIX);
        PathBuf::from(o)
    }
}

/// Builds tasks in source order, dropping (and logging) URLs without a file name.
pub fn tasks_from_urls<I>(urls: I) -> Vec<DownloadTask>
where
    I: IntoIterator<Item = String>,
{
    urls.into_iter()
        .filter_map(|url| {
            let task = DownloadTask::new(url.as_str());
            if task.is_none() {
                tracing::warn!(%url, "skipping URL without a file name");
            }
            task
        })
        .collect()
}
