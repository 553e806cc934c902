//! TUI keyboard input handling.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::page::Page;
use crate::submit::SubmissionHandler;

use super::state::*;

/// Apply one key press. Returns `true` when the TUI should exit.
pub(crate) fn handle_key(app: &mut App, page: &Page, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.exit = true;
        return true;
    }

    // An open alert swallows input until dismissed.
    if page.with(|view| view.alert_message().is_some()) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            page.with(|view| view.dismiss_alert());
        }
        return false;
    }

    let results_visible = page.with(|view| view.results.is_visible());

    match key.code {
        KeyCode::Esc => {
            app.exit = true;
            return true;
        }
        KeyCode::Tab => app.focus = app.focus.next(results_visible),
        KeyCode::BackTab => app.focus = app.focus.prev(results_visible),
        KeyCode::Char('s') if ctrl => app.pending_action = Some(Action::Submit),
        KeyCode::Enter => match app.focus {
            Focus::Submit => app.pending_action = Some(Action::Submit),
            Focus::ResumePath | Focus::JobDescription => {
                app.focus = app.focus.next(results_visible)
            }
            Focus::Results => {}
        },
        KeyCode::Up if app.focus == Focus::Results => {
            app.results_scroll = app.results_scroll.saturating_sub(1);
        }
        KeyCode::Down if app.focus == Focus::Results => {
            app.results_scroll = app.results_scroll.saturating_add(1);
        }
        KeyCode::Backspace => {
            if let Some(input) = app.active_input_mut() {
                input.pop();
                app.sync_form(page);
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(input) = app.active_input_mut() {
                input.push(c);
                app.sync_form(page);
            }
        }
        _ => {}
    }
    false
}

/// Spawn a submission unless one is already running or the control is disabled.
pub(crate) fn start_submission(
    rt: &tokio::runtime::Handle,
    handler: &Arc<SubmissionHandler>,
    page: &Page,
    app: &mut App,
) {
    if app.pending.is_some()
        || handler.is_in_flight()
        || page.with(|view| view.submit.disabled)
    {
        debug!("submit ignored: control is busy");
        return;
    }

    app.sync_form(page);
    app.started = Instant::now();
    let handler = Arc::clone(handler);
    let page = page.clone();
    app.pending = Some(rt.spawn(async move { handler.handle_submit(&page).await }));
}
