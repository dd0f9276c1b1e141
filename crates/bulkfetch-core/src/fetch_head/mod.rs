//! HTTP HEAD size probing.
//!
//! Uses the curl crate (libcurl) to fetch response headers and read
//! `Content-Length` before any body bytes are requested.

mod parse;

use std::str;

use crate::downloader::HttpOptions;

pub use parse::content_length;

/// Why a probe could not produce a size.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("HEAD request failed: {0}")]
    Request(#[from] curl::Error),
    #[error("HEAD returned HTTP {0}")]
    Status(u32),
    #[error("Content-Length missing")]
    MissingLength,
    #[error("Content-Length not parsable: {0:?}")]
    InvalidLength(String),
}

/// Performs a HEAD request for `url` and returns the advertised size in bytes.
///
/// Follows redirects when enabled; the size comes from the final response.
/// Runs in the current thread.
pub fn probe(url: &str, http: &HttpOptions) -> Result<u64, ProbeError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    http.apply(&mut easy)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(ProbeError::Status(code));
    }

    content_length(&headers)
}
