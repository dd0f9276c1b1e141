use bulkfetch_core::sampler::Sample;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::view;

/// Line-mode output: a status line per sample and each new commit once.
#[derive(Default)]
pub struct PlainDashboard {
    last_recent: Vec<PathBuf>,
}

impl PlainDashboard {
    pub fn draw(&mut self, sample: &Sample) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for path in new_entries(&self.last_recent, &sample.recent) {
            writeln!(out, "done {}", path.display())?;
        }
        writeln!(out, "{}", view::status_line(sample))?;
        out.flush()?;
        self.last_recent = sample.recent.clone();
        Ok(())
    }
}

/// Entries of `current` that were not present in `previous`. Both are ordered
/// oldest first, so the new ones form a suffix of `current`.
fn new_entries<'a>(previous: &[PathBuf], current: &'a [PathBuf]) -> &'a [PathBuf] {
    let Some(last_seen) = previous.last() else {
        return current;
    };
    match current.iter().rposition(|p| p == last_seen) {
        Some(i) => &current[i + 1..],
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn first_sample_reports_everything() {
        let current = paths(&["/a", "/b"]);
        assert_eq!(new_entries(&[], &current), current.as_slice());
    }

    #[test]
    fn only_entries_after_last_seen_are_new() {
        let previous = paths(&["/a", "/b"]);
        let current = paths(&["/b", "/c", "/d"]);
        assert_eq!(new_entries(&previous, &current), paths(&["/c", "/d"]).as_slice());
    }

    #[test]
    fn unchanged_ring_reports_nothing() {
        let ring = paths(&["/a", "/b"]);
        assert!(new_entries(&ring, &ring).is_empty());
    }
}
