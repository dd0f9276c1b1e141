//! Extract `Content-Length` from raw response header lines.

use super::ProbeError;

/// Returns the `Content-Length` of the last response block in `lines`.
///
/// With redirects curl reports every hop's headers; a status line starts a new
/// block. The value must be a plain non-negative decimal integer.
pub fn content_length<S: AsRef<str>>(lines: &[S]) -> Result<u64, ProbeError> {
    let mut raw: Option<&str> = None;

    for line in lines {
        let line = line.as_ref().trim();
        if line.starts_with("HTTP/") {
            raw = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                raw = Some(value.trim());
            }
        }
    }

    let raw = raw.ok_or(ProbeError::MissingLength)?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProbeError::InvalidLength(raw.to_string()));
    }
    raw.parse::<u64>()
        .map_err(|_| ProbeError::InvalidLength(raw.to_string()))
}
