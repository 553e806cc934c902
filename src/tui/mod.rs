//! Fullscreen terminal UI (TUI).
//!
//! The form, submit control and results region are drawn from a [`Page`]
//! snapshot each frame. Submissions run as tasks on the runtime and write
//! into the same page; the loop only polls for their completion.

pub(crate) mod animation;
pub(crate) mod input;
pub(crate) mod screens;
pub(crate) mod state;
pub(crate) mod theme;
pub(crate) mod widgets;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::page::{Page, PageView};
use crate::submit::{SubmissionHandler, REQUEST_FAILED_MESSAGE};

use state::*;
use theme::Theme;

const FRAME_TIME: Duration = Duration::from_millis(16);

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub(crate) fn run_tui(
    rt: &tokio::runtime::Runtime,
    handler: Arc<SubmissionHandler>,
    page: Page,
    endpoint: &str,
) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(&page);

    loop {
        let view = page.snapshot();
        terminal.draw(|f| draw(f.area(), f, &app, &view, endpoint))?;

        poll_submission(rt, &page, &mut app);

        if page.with(|view| view.results.take_scroll_request()) {
            app.focus = Focus::Results;
            app.results_scroll = 0;
        }

        if let Some(action) = app.pending_action.take() {
            match action {
                Action::Submit => input::start_submission(rt.handle(), &handler, &page, &mut app),
            }
            continue;
        }

        if event::poll(FRAME_TIME)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && input::handle_key(&mut app, &page, key) {
                    break;
                }
            }
        }

        if app.exit {
            break;
        }
    }

    if let Some(handle) = app.pending.take() {
        debug!("abandoning in-flight submission");
        handle.abort();
    }
    Ok(())
}

/// Collect a finished submission task. A task that died without an outcome
/// still gets an alert; its guard has already restored the submit control.
fn poll_submission(rt: &tokio::runtime::Runtime, page: &Page, app: &mut App) {
    if !app.pending.as_ref().is_some_and(JoinHandle::is_finished) {
        return;
    }
    let Some(handle) = app.pending.take() else {
        return;
    };

    match rt.block_on(handle) {
        Ok(outcome) => debug!(?outcome, "submission finished"),
        Err(err) => {
            error!(error = %err, "submission task failed");
            page.with(|view| view.alert(REQUEST_FAILED_MESSAGE));
        }
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, app: &App, view: &PageView, endpoint: &str) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Length(7), // form
            Constraint::Min(0),    // results
            Constraint::Length(1), // footer
        ])
        .split(area);

    widgets::header::draw_header(layout[0], f, &theme, endpoint);
    screens::form::draw_form(layout[1], f, app, &view.submit, theme);
    screens::results::draw_results(layout[2], f, app, &view.results, theme);

    let hints: &[(&str, &str)] = match (view.alert_message().is_some(), app.focus) {
        (true, _) => &[("Enter/Esc", "Dismiss"), ("Ctrl+C", "Quit")],
        (false, Focus::Results) => &[("↑/↓", "Scroll"), ("Tab", "Field"), ("Esc", "Quit")],
        (false, Focus::Submit) => &[("Enter", "Analyze"), ("Tab", "Field"), ("Esc", "Quit")],
        (false, _) => &[
            ("Type", "Edit"),
            ("Tab", "Field"),
            ("Ctrl+S", "Analyze"),
            ("Esc", "Quit"),
        ],
    };
    widgets::footer::draw_footer(layout[3], f, &theme, hints);

    if let Some(message) = view.alert_message() {
        screens::alert::draw_alert(area, f, message, theme);
    }
}
