//! Single-stream HTTP GET into the temp file, counting bytes as they land.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::error::{CopyError, FetchError};
use super::HttpOptions;
use crate::progress::{DownloadProgress, GlobalStats};

/// Either side of a failed body transfer.
#[derive(Debug)]
pub(super) enum StreamError {
    Fetch(FetchError),
    Copy(CopyError),
}

impl From<curl::Error> for StreamError {
    fn from(e: curl::Error) -> Self {
        StreamError::Fetch(FetchError::Transport(e))
    }
}

/// Streams `url` into `file`. Each chunk is written first, then added to the
/// slot's counter and the global rate accumulator. Returns bytes written.
pub(super) fn stream_to_file(
    url: &str,
    file: File,
    progress: &DownloadProgress,
    stats: &GlobalStats,
    http: &HttpOptions,
) -> Result<u64, StreamError> {
    let mut out = BufWriter::new(file);
    let mut write_error: Option<std::io::Error> = None;
    let mut received = 0u64;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.fail_on_error(true)?;
    http.apply(&mut easy)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if let Err(e) = out.write_all(data) {
                write_error = Some(e);
                return Ok(0); // abort transfer
            }
            let n = data.len() as u64;
            received += n;
            progress.add_downloaded(n);
            stats.add_bytes(n);
            Ok(data.len())
        })?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(StreamError::Copy(CopyError::Write(e)));
    }
    if let Err(e) = performed {
        if e.is_http_returned_error() {
            let code = easy.response_code().unwrap_or(0);
            return Err(StreamError::Fetch(FetchError::Status(code)));
        }
        if received == 0 {
            return Err(StreamError::Fetch(FetchError::Transport(e)));
        }
        return Err(StreamError::Copy(CopyError::Interrupted {
            received,
            source: e,
        }));
    }

    out.flush()
        .map_err(|e| StreamError::Copy(CopyError::Write(e)))?;
    Ok(received)
}
