//! Text shown by the dashboards, independent of the terminal backend.

use bulkfetch_core::sampler::Sample;
use humansize::{format_size, DECIMAL};

/// `"<completed> / <total>"`, both padded to seven columns.
pub fn total_label(sample: &Sample) -> String {
    format!("{:7} / {:7}", sample.completed, sample.total)
}

/// Throughput such as `" 1.20 MB/s"`.
pub fn speed_label(bytes_per_sec: f64) -> String {
    let rate = if bytes_per_sec.is_finite() && bytes_per_sec > 0.0 {
        bytes_per_sec.round() as u64
    } else {
        0
    };
    format!("{:>8}/s", format_size(rate, DECIMAL))
}

pub fn failed_label(sample: &Sample) -> String {
    format!("failed: {}", sample.failed)
}

/// Recent paths, newest first.
pub fn recent_lines(sample: &Sample) -> Vec<String> {
    sample
        .recent
        .iter()
        .rev()
        .map(|p| p.display().to_string())
        .collect()
}

/// One line per sample for non-interactive output.
pub fn status_line(sample: &Sample) -> String {
    format!(
        "[{}/{}] {}  active {}  {}",
        sample.completed,
        sample.total,
        speed_label(sample.bytes_per_sec).trim(),
        sample.streaming,
        failed_label(sample)
    )
}
