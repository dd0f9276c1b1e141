//! bulkfetch core: bounded parallel bulk downloads with live progress.
//!
//! Pipeline per task: url_source → task → scheduler (slot pool) → retry →
//! downloader (fetch_head probe, stream, commit) → progress. The sampler is
//! the read side a dashboard polls.

pub mod config;
pub mod logging;

pub mod downloader;
pub mod fetch_head;
pub mod progress;
pub mod retry;
pub mod sampler;
pub mod scheduler;
pub mod task;
pub mod url_model;
pub mod url_source;
