//! Live progress display: full-screen terminal UI or plain status lines.

mod plain;
mod tui;

use anyhow::{Context, Result};
use bulkfetch_core::sampler::Sample;
use std::io::{self, IsTerminal};

use plain::PlainDashboard;
use tui::TuiDashboard;

pub enum Dashboard {
    Tui(TuiDashboard),
    Plain(PlainDashboard),
}

impl Dashboard {
    /// Falls back to plain lines when stdout is not a terminal.
    pub fn open(force_plain: bool) -> Result<Self> {
        if force_plain || !io::stdout().is_terminal() {
            return Ok(Dashboard::Plain(PlainDashboard::default()));
        }
        let tui = TuiDashboard::open().context("cannot initialize terminal dashboard")?;
        Ok(Dashboard::Tui(tui))
    }

    pub fn draw(&mut self, sample: &Sample) -> Result<()> {
        match self {
            Dashboard::Tui(tui) => tui.draw(sample).context("dashboard draw failed"),
            Dashboard::Plain(plain) => plain.draw(sample).context("status output failed"),
        }
    }

    /// Whether `quit_requested` should be polled (plain mode relies on Ctrl-C only).
    pub fn reads_keys(&self) -> bool {
        matches!(self, Dashboard::Tui(_))
    }

    /// Drains pending key events; true if one of them asks to quit.
    pub fn quit_requested(&mut self) -> Result<bool> {
        match self {
            Dashboard::Tui(tui) => tui.quit_requested().context("reading terminal input failed"),
            Dashboard::Plain(_) => Ok(false),
        }
    }
}
