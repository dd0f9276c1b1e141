//! Per-attempt failure taxonomy. Every variant is retried by the caller.

use std::io;
use std::path::PathBuf;

use crate::fetch_head::ProbeError;

/// Failure of the body request before any byte arrived.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] curl::Error),
    #[error("HTTP {0}")]
    Status(u32),
}

/// Failure while copying the body into the temp file.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("write: {0}")]
    Write(#[from] io::Error),
    #[error("transfer interrupted after {received} bytes: {source}")]
    Interrupted { received: u64, source: curl::Error },
}

/// Why one download attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    #[error("create {} failed: {source}", path.display())]
    CreateFailed { path: PathBuf, source: io::Error },
    #[error("probe {url} failed: {source}")]
    ProbeFailed { url: String, source: ProbeError },
    #[error("GET {url} failed: {source}")]
    FetchFailed { url: String, source: FetchError },
    #[error("copy {url} to {} failed: {source}", path.display())]
    CopyFailed {
        url: String,
        path: PathBuf,
        source: CopyError,
    },
    #[error("rename {} to {} failed: {source}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("resolve absolute path of {} failed: {source}", path.display())]
    PathResolutionFailed { path: PathBuf, source: io::Error },
}

impl AttemptError {
    /// Short tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AttemptError::CreateFailed { .. } => "create_failed",
            AttemptError::ProbeFailed { .. } => "probe_failed",
            AttemptError::FetchFailed { .. } => "fetch_failed",
            AttemptError::CopyFailed { .. } => "copy_failed",
            AttemptError::RenameFailed { .. } => "rename_failed",
            AttemptError::PathResolutionFailed { .. } => "path_resolution_failed",
        }
    }
}
