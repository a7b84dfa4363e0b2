//! # Key Handling
//!
//! Maps key presses to [`App`] state changes. Anything that needs the
//! network comes back as a [`KeyOutcome`] for the event loop to act on.
//!
//! ## Global
//! - `Ctrl+C` - Quit
//! - `F1` - Help
//! - `F2` - Toggle light/dark mode
//! - `F3` - Cycle accent color
//!
//! ## Profile form
//! - `Tab` / `↓` - Next field, `Shift+Tab` / `↑` - Previous field
//! - `←` / `→` - Adjust stress, free time, difficulty, hours
//! - `Ctrl+N` - Add course, `Ctrl+D` - Remove focused course
//! - `Enter` / `Ctrl+S` - Submit
//! - `Esc` - Cancel a running analysis, otherwise quit
//!
//! ## Dashboard
//! - `←` `→` / `h` `l` - Select day, `↑` `↓` / `k` `j` - Scroll tasks
//! - `f` - Adjust schedule (feedback modal)
//! - `r` - Start over
//! - `t` - Toggle mode, `c` - Cycle accent
//! - `?` - Help, `q` - Quit

use crate::planner::request::PlanRequest;
use crate::ui::app::{App, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop must do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Continue,
    /// Start this request, superseding anything in flight.
    Dispatch(PlanRequest),
    /// Abort the in-flight request.
    Cancel,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    if key.kind == KeyEventKind::Release {
        return KeyOutcome::Continue;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return KeyOutcome::Continue;
    }

    // Blocking overlay: nothing but quit while the schedule is being adjusted.
    if app.adjusting {
        return KeyOutcome::Continue;
    }

    match key.code {
        KeyCode::F(1) => {
            app.toggle_help();
            return KeyOutcome::Continue;
        }
        KeyCode::F(2) => {
            app.theme.toggle_mode();
            return KeyOutcome::Continue;
        }
        KeyCode::F(3) => {
            app.theme.cycle_accent();
            return KeyOutcome::Continue;
        }
        _ => {}
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.toggle_help();
        }
        return KeyOutcome::Continue;
    }

    match app.screen {
        Screen::Form => handle_form_key(app, key, ctrl),
        Screen::Dashboard => {
            if app.feedback.is_some() {
                handle_feedback_key(app, key)
            } else {
                handle_dashboard_key(app, key)
            }
        }
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent, ctrl: bool) -> KeyOutcome {
    if app.loading {
        if key.code == KeyCode::Esc {
            app.cancel_loading();
            return KeyOutcome::Cancel;
        }
        return KeyOutcome::Continue;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Left => app.form.adjust(-1),
        KeyCode::Right => app.form.adjust(1),
        KeyCode::Backspace => app.form.pop_char(),
        KeyCode::Enter => return dispatch(app.submit_form()),
        KeyCode::Char('s') if ctrl => return dispatch(app.submit_form()),
        KeyCode::Char('n') if ctrl => app.form.add_course(),
        KeyCode::Char('d') if ctrl => {
            app.form.remove_focused_course();
        }
        KeyCode::Char(c) if !ctrl => {
            if app.form.focused().is_text() {
                app.form.push_char(c);
            } else {
                match c {
                    '+' | '=' => app.form.adjust(1),
                    '-' => app.form.adjust(-1),
                    _ => {}
                }
            }
        }
        _ => {}
    }
    KeyOutcome::Continue
}

fn handle_feedback_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    match key.code {
        KeyCode::Esc => app.close_feedback(),
        KeyCode::Enter => return dispatch(app.submit_feedback()),
        KeyCode::Backspace => app.feedback_pop_char(),
        KeyCode::Char(c) => app.feedback_push_char(c),
        _ => {}
    }
    KeyOutcome::Continue
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('r') => {
            app.reset();
            return KeyOutcome::Cancel;
        }
        KeyCode::Char('f') => app.open_feedback(),
        KeyCode::Char('t') => app.theme.toggle_mode(),
        KeyCode::Char('c') => app.theme.cycle_accent(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Right | KeyCode::Char('l') => app.next_day(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_day(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_tasks_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_tasks_up(),
        _ => {}
    }
    KeyOutcome::Continue
}

fn dispatch(request: Option<PlanRequest>) -> KeyOutcome {
    request.map_or(KeyOutcome::Continue, KeyOutcome::Dispatch)
}
