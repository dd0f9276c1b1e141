//! Full-screen dashboard (ratatui over crossterm).
//!
//! Layout, top to bottom: recent downloads, total gauge beside speed and
//! failures, then one label line and one gauge line per worker slot.

use bulkfetch_core::sampler::{Sample, SlotView};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

use crate::cli::view;

pub struct TuiDashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiDashboard {
    /// Enters raw mode and the alternate screen; undone on drop.
    pub fn open() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            restore_terminal();
            return Err(e);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(mut terminal) => {
                let _ = terminal.hide_cursor();
                Ok(Self { terminal })
            }
            Err(e) => {
                restore_terminal();
                Err(e)
            }
        }
    }

    pub fn draw(&mut self, sample: &Sample) -> io::Result<()> {
        self.terminal.draw(|f| render(f, sample))?;
        Ok(())
    }

    /// Non-blocking: drains queued events without waiting for new ones.
    pub fn quit_requested(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_quit_key(&key) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

impl Drop for TuiDashboard {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// `q`, `Esc`, `Ctrl-X` and `Ctrl-C`. Raw mode delivers Ctrl-C as a key, not a signal.
fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('x') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn render(f: &mut Frame, sample: &Sample) {
    let recent_height = sample.recent.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(recent_height.max(3)),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(f.size());

    render_recent(f, sample, chunks[0]);
    render_totals(f, sample, chunks[1]);
    render_slots(f, &sample.slots, chunks[2]);
}

fn render_recent(f: &mut Frame, sample: &Sample, area: Rect) {
    let items: Vec<ListItem> = view::recent_lines(sample)
        .into_iter()
        .map(ListItem::new)
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title("Recent downloads")
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

fn render_totals(f: &mut Frame, sample: &Sample, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let total = Gauge::default()
        .block(Block::default().title("Total").borders(Borders::ALL))
        .gauge_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .percent(sample.completion_percent())
        .label(view::total_label(sample));
    f.render_widget(total, halves[0]);

    let failed_style = if sample.failed > 0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let speed = Paragraph::new(format!(
        "{}\n{}",
        view::speed_label(sample.bytes_per_sec),
        view::failed_label(sample)
    ))
    .style(failed_style)
    .block(Block::default().title("Speed").borders(Borders::ALL));
    f.render_widget(speed, halves[1]);
}

fn render_slots(f: &mut Frame, slots: &[SlotView], area: Rect) {
    let block = Block::default().title("Workers").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints: Vec<Constraint> = slots
        .iter()
        .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, slot) in slots.iter().enumerate() {
        let pct = slot.percent();
        f.render_widget(Paragraph::new(slot.label.as_str()), rows[2 * i]);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .percent(pct)
            .label(format!("{:>3}%", pct));
        f.render_widget(gauge, rows[2 * i + 1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(is_quit_key(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn plain_letters_do_not_quit() {
        assert!(!is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&key(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn render_fits_small_terminal() {
        use ratatui::backend::TestBackend;

        let sample = Sample {
            slots: vec![
                SlotView {
                    label: "http://h/a.bin (1.00 kB)".into(),
                    total: 1000,
                    downloaded: 500,
                },
                SlotView {
                    label: String::new(),
                    total: 0,
                    downloaded: 0,
                },
            ],
            bytes: 0,
            bytes_per_sec: 0.0,
            completed: 1,
            failed: 0,
            total: 3,
            streaming: 1,
            recent: vec!["/out/z.bin".into()],
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal.draw(|f| render(f, &sample)).unwrap();
    }
}
