//! Line-oriented URL list: one URL per line, read once at startup.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads URLs from any line source. Lines are trimmed; blank lines are skipped.
pub fn parse_url_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read line {}", index + 1))?;
        let url = line.trim();
        if !url.is_empty() {
            urls.push(url.to_string());
        }
    }
    Ok(urls)
}

/// Reads the URL list file at `path`.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("{} cannot be opened", path.display()))?;
    let urls = parse_url_lines(BufReader::new(file))
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::info!(count = urls.len(), path = %path.display(), "loaded URL list");
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn trims_and_skips_blank_lines() {
        let input = "https://a.example/1.jpg\n\n  https://a.example/2.jpg  \r\n\t\nhttps://a.example/3.jpg";
        let urls = parse_url_lines(Cursor::new(input)).unwrap();
        assert_eq!(
            urls,
            [
                "https://a.example/1.jpg",
                "https://a.example/2.jpg",
                "https://a.example/3.jpg"
            ]
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_url_list(&dir.path().join("nope.txt")).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.txt"));
    }

    #[test]
    fn reads_file_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "http://h/b\nhttp://h/a\n").unwrap();
        assert_eq!(read_url_list(&path).unwrap(), ["http://h/b", "http://h/a"]);
    }
}
