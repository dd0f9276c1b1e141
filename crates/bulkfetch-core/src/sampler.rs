//! Periodic read side of the progress state, consumed by the dashboard.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::progress::ProgressState;

/// One slot as seen at sampling time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub label: String,
    pub total: u64,
    pub downloaded: u64,
}

impl SlotView {
    /// Percentage in `0..=100`; an idle slot (size 0) reads 0.
    pub fn percent(&self) -> u16 {
        let pct = self.downloaded as f64 / (self.total as f64 + 0.01) * 100.0;
        pct.clamp(0.0, 100.0) as u16
    }
}

/// Everything the dashboard renders for one tick.
#[derive(Debug, Clone)]
pub struct Sample {
    pub slots: Vec<SlotView>,
    /// Bytes transferred since the previous sample.
    pub bytes: u64,
    /// `bytes` divided by the sampling interval.
    pub bytes_per_sec: f64,
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
    pub streaming: usize,
    /// Recently committed paths, oldest first.
    pub recent: Vec<PathBuf>,
}

impl Sample {
    /// Completion in `0..=100`.
    pub fn completion_percent(&self) -> u16 {
        let pct = self.completed as f64 / (self.total as f64 + 0.01) * 100.0;
        pct.clamp(0.0, 100.0) as u16
    }
}

/// Reads the shared state on a fixed interval. Each `sample` drains the rate
/// accumulator, so only one sampler should run per state.
#[derive(Debug, Clone)]
pub struct Sampler {
    state: Arc<ProgressState>,
    interval: Duration,
}

impl Sampler {
    pub fn new(state: Arc<ProgressState>, interval: Duration) -> Self {
        Self { state, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn sample(&self) -> Sample {
        let slots = self
            .state
            .slots()
            .current_all()
            .iter()
            .map(|p| SlotView {
                label: p.label().to_string(),
                total: p.total(),
                downloaded: p.downloaded(),
            })
            .collect();

        let stats = self.state.stats();
        let bytes = stats.take_bytes();
        let secs = self.interval.as_secs_f64();
        let bytes_per_sec = if secs > 0.0 { bytes as f64 / secs } else { 0.0 };

        Sample {
            slots,
            bytes,
            bytes_per_sec,
            completed: stats.completed(),
            failed: stats.failed(),
            total: stats.total(),
            streaming: stats.streaming(),
            recent: self.state.recent().recent(),
        }
    }
}
