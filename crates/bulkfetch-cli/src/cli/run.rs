//! `bulkfetch <url-list> <dest-dir>`: dispatch downloads and drive the dashboard.

use anyhow::{Context, Result};
use bulkfetch_core::config::BulkConfig;
use bulkfetch_core::downloader::Downloader;
use bulkfetch_core::progress::ProgressState;
use bulkfetch_core::sampler::Sampler;
use bulkfetch_core::scheduler::{RunSummary, Scheduler};
use bulkfetch_core::task::tasks_from_urls;
use bulkfetch_core::url_source::read_url_list;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::oneshot;

use super::dashboard::Dashboard;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

enum Exit {
    Finished(RunSummary),
    Quit,
}

pub async fn run_downloads(
    cfg: &BulkConfig,
    url_list: &Path,
    dest_dir: &Path,
    force_plain: bool,
) -> Result<()> {
    let urls = read_url_list(url_list)?;
    let tasks = tasks_from_urls(urls);
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("cannot create destination {}", dest_dir.display()))?;

    let state = Arc::new(ProgressState::new(
        cfg.max_concurrent,
        cfg.recent_capacity,
        tasks.len(),
    ));
    let sampler = Sampler::new(Arc::clone(&state), cfg.sample_interval());
    let mut dashboard = Dashboard::open(force_plain)?;

    let downloader = Arc::new(Downloader::new(
        dest_dir,
        cfg.http.to_options(),
        Arc::clone(&state),
    ));
    let scheduler = Scheduler::new(downloader, cfg.retry.to_policy());
    tracing::info!(
        tasks = tasks.len(),
        slots = cfg.max_concurrent,
        dest = %dest_dir.display(),
        "starting downloads"
    );

    // Plain OS thread: returning from main on quit must not wait for it.
    let (done_tx, mut done_rx) = oneshot::channel::<RunSummary>();
    thread::Builder::new()
        .name("bulkfetch-dispatch".to_string())
        .spawn(move || {
            let summary = scheduler.run(tasks);
            let _ = done_tx.send(summary);
        })
        .context("cannot start dispatcher thread")?;

    let mut sample_tick = tokio::time::interval(sampler.interval());
    let mut input_tick = tokio::time::interval(INPUT_POLL_INTERVAL);
    let reads_keys = dashboard.reads_keys();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let exit = loop {
        tokio::select! {
            _ = sample_tick.tick() => {
                dashboard.draw(&sampler.sample())?;
            }
            _ = input_tick.tick(), if reads_keys => {
                if dashboard.quit_requested()? {
                    break Exit::Quit;
                }
            }
            _ = &mut ctrl_c => break Exit::Quit,
            summary = &mut done_rx => {
                let summary = summary.context("dispatcher stopped without a summary")?;
                break Exit::Finished(summary);
            }
        }
    };

    let last = sampler.sample();
    match exit {
        Exit::Quit => {
            drop(dashboard);
            tracing::info!(
                completed = last.completed,
                total = last.total,
                "quit requested, leaving in-flight downloads"
            );
            Ok(())
        }
        Exit::Finished(summary) => {
            dashboard.draw(&last)?;
            drop(dashboard);
            println!("Download Completed: {}", last.completed);
            for url in summary.abandoned() {
                eprintln!("failed: {}", url);
            }
            Ok(())
        }
    }
}
