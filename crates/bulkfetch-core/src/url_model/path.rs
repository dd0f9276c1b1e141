//! File name extraction from the URL path.

/// Returns the last non-empty path segment of `url`, without query or fragment.
///
/// Lines that are not absolute URLs (e.g. `host/dir/file.bin`) fall back to the
/// text after the final `/`, minus any `?query` or `#fragment`.
pub fn last_path_segment(url: &str) -> Option<String> {
    let segment = match url::Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segs| segs.rfind(|s| !s.is_empty()))
            .map(str::to_string),
        Err(_) => {
            let no_suffix = url.split(['?', '#']).next().unwrap_or("");
            no_suffix
                .rsplit('/')
                .find(|s| !s.is_empty())
                .map(str::to_string)
        }
    }?;

    match segment.as_str() {
        "" | "." | ".." => None,
        _ => Some(segment),
    }
}
