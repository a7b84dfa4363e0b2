//! Keyboard event handling tests
//!
//! Tests for key routing across the form, dashboard, feedback modal, help
//! popup and the blocking adjustment overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use timepilot::planner::{
    AnalysisResult, Completion, DailyPlan, PlanRequest, RequestKind, ScheduledTask, TaskType,
};
use timepilot::ui::form::{CourseField, FormField, ProfileForm};
use timepilot::ui::theme::{AccentColor, ThemeMode};
use timepilot::ui::{handle_key, App, KeyOutcome, Screen, ThemeState};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        handle_key(app, key(KeyCode::Char(c)));
    }
}

fn two_day_result() -> AnalysisResult {
    let day = |name: &str, date: &str, tasks: usize| DailyPlan {
        day: name.to_string(),
        date: date.to_string(),
        stress_score: 50.0,
        tasks: (0..tasks)
            .map(|i| ScheduledTask {
                time: format!("{:02}:00", 9 + i),
                activity: format!("Block {}", i),
                kind: TaskType::Study,
                duration_minutes: 45,
            })
            .collect(),
    };
    AnalysisResult {
        daily_plans: vec![day("Monday", "2024-06-17", 3), day("Tuesday", "2024-06-18", 0)],
        overall_analysis: "ok".to_string(),
        recommendations: vec![],
        high_pressure_days: vec![],
    }
}

fn dashboard_app() -> App {
    let mut app = App::new(ThemeState::default()).with_form(ProfileForm::demo());
    app.submit_form().expect("request");
    app.apply(Completion {
        kind: RequestKind::Analyze,
        outcome: Ok(two_day_result()),
    });
    app
}

#[test]
fn test_ctrl_c_quits_everywhere() {
    let mut app = App::new(ThemeState::default());
    handle_key(&mut app, ctrl('c'));
    assert!(app.should_quit);

    let mut app = dashboard_app();
    app.open_feedback();
    app.feedback_push_char('x');
    app.submit_feedback().expect("request");
    handle_key(&mut app, ctrl('c'));
    assert!(app.should_quit);
}

#[test]
fn test_key_release_is_ignored() {
    let mut app = App::new(ThemeState::default());
    let mut release = key(KeyCode::Char('a'));
    release.kind = KeyEventKind::Release;
    handle_key(&mut app, release);
    assert!(app.form.name.is_empty());
}

#[test]
fn test_typing_into_name_field() {
    let mut app = App::new(ThemeState::default());
    type_text(&mut app, "Ada");
    handle_key(&mut app, key(KeyCode::Backspace));
    assert_eq!(app.form.name, "Ad");
}

#[test]
fn test_tab_moves_focus_and_arrows_adjust() {
    let mut app = App::new(ThemeState::default());
    handle_key(&mut app, key(KeyCode::Tab));
    assert_eq!(app.form.focused(), FormField::StressLevel);

    let before = app.form.stress_level;
    handle_key(&mut app, key(KeyCode::Right));
    assert_eq!(app.form.stress_level, before + 1);
    handle_key(&mut app, key(KeyCode::Char('-')));
    assert_eq!(app.form.stress_level, before);

    handle_key(&mut app, key(KeyCode::BackTab));
    assert_eq!(app.form.focused(), FormField::Name);
}

#[test]
fn test_ctrl_n_and_ctrl_d_edit_course_rows() {
    let mut app = App::new(ThemeState::default());
    handle_key(&mut app, ctrl('n'));
    assert_eq!(app.form.courses.len(), 2);
    assert_eq!(
        app.form.focused(),
        FormField::Course {
            row: 1,
            field: CourseField::Name
        }
    );

    handle_key(&mut app, ctrl('d'));
    assert_eq!(app.form.courses.len(), 1);

    // The last row cannot be removed.
    handle_key(&mut app, key(KeyCode::Tab));
    handle_key(&mut app, key(KeyCode::Tab));
    handle_key(&mut app, key(KeyCode::Tab));
    handle_key(&mut app, ctrl('d'));
    assert_eq!(app.form.courses.len(), 1);
}

#[test]
fn test_enter_dispatches_analysis() {
    let mut app = App::new(ThemeState::default()).with_form(ProfileForm::demo());
    let outcome = handle_key(&mut app, key(KeyCode::Enter));
    assert!(matches!(
        outcome,
        KeyOutcome::Dispatch(PlanRequest::Analyze(_))
    ));
    assert!(app.loading);

    // Second submit while loading does nothing.
    assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), KeyOutcome::Continue);
}

#[test]
fn test_enter_with_invalid_form_shows_error() {
    let mut app = App::new(ThemeState::default());
    assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), KeyOutcome::Continue);
    assert!(app.error.is_some());
}

#[test]
fn test_esc_cancels_loading_before_quitting() {
    let mut app = App::new(ThemeState::default()).with_form(ProfileForm::demo());
    handle_key(&mut app, key(KeyCode::Enter));

    assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), KeyOutcome::Cancel);
    assert!(!app.loading);
    assert!(!app.should_quit);

    handle_key(&mut app, key(KeyCode::Esc));
    assert!(app.should_quit);
}

#[test]
fn test_dashboard_day_and_task_navigation() {
    let mut app = dashboard_app();
    assert_eq!(app.screen, Screen::Dashboard);

    handle_key(&mut app, key(KeyCode::Char('j')));
    handle_key(&mut app, key(KeyCode::Char('j')));
    handle_key(&mut app, key(KeyCode::Char('j')));
    assert_eq!(app.task_scroll, 2, "scroll stops at the last task");

    handle_key(&mut app, key(KeyCode::Char('l')));
    assert_eq!(app.selected_day, 1);
    assert_eq!(app.task_scroll, 0);

    handle_key(&mut app, key(KeyCode::Right));
    assert_eq!(app.selected_day, 0);
}

#[test]
fn test_theme_keys() {
    let mut app = dashboard_app();
    handle_key(&mut app, key(KeyCode::Char('t')));
    assert_eq!(app.theme.mode, ThemeMode::Dark);
    handle_key(&mut app, key(KeyCode::Char('c')));
    assert_eq!(app.theme.accent, AccentColor::Blue);

    // Function keys work on the form too, where letters are text.
    let mut app = App::new(ThemeState::default());
    handle_key(&mut app, key(KeyCode::F(2)));
    handle_key(&mut app, key(KeyCode::F(3)));
    assert_eq!(app.theme.mode, ThemeMode::Dark);
    assert_eq!(app.theme.accent, AccentColor::Blue);
    assert!(app.form.name.is_empty());
}

#[test]
fn test_feedback_modal_flow() {
    let mut app = dashboard_app();
    handle_key(&mut app, key(KeyCode::Char('f')));
    assert_eq!(app.feedback.as_deref(), Some(""));

    // Letters go to the modal, not to dashboard shortcuts.
    type_text(&mut app, "quiet");
    assert!(!app.should_quit);
    assert_eq!(app.feedback.as_deref(), Some("quiet"));

    let outcome = handle_key(&mut app, key(KeyCode::Enter));
    let KeyOutcome::Dispatch(PlanRequest::Adjust { feedback, .. }) = outcome else {
        panic!("expected an adjustment request");
    };
    assert_eq!(feedback, "quiet");
    assert!(app.adjusting);
}

#[test]
fn test_feedback_modal_esc_closes() {
    let mut app = dashboard_app();
    handle_key(&mut app, key(KeyCode::Char('f')));
    handle_key(&mut app, key(KeyCode::Esc));
    assert!(app.feedback.is_none());
    assert_eq!(app.screen, Screen::Dashboard);
}

#[test]
fn test_overlay_blocks_input_while_adjusting() {
    let mut app = dashboard_app();
    handle_key(&mut app, key(KeyCode::Char('f')));
    type_text(&mut app, "more breaks");
    handle_key(&mut app, key(KeyCode::Enter));
    assert!(app.adjusting);

    for code in [
        KeyCode::Char('q'),
        KeyCode::Char('r'),
        KeyCode::Esc,
        KeyCode::Right,
        KeyCode::F(2),
    ] {
        assert_eq!(handle_key(&mut app, key(code)), KeyOutcome::Continue);
    }
    assert!(!app.should_quit);
    assert_eq!(app.selected_day, 0);
    assert_eq!(app.theme.mode, ThemeMode::Light);
    assert!(app.result.is_some());
}

#[test]
fn test_reset_key_returns_to_form_and_cancels() {
    let mut app = dashboard_app();
    assert_eq!(handle_key(&mut app, key(KeyCode::Char('r'))), KeyOutcome::Cancel);
    assert_eq!(app.screen, Screen::Form);
    assert!(app.result.is_none());
}

#[test]
fn test_help_popup_swallows_keys() {
    let mut app = dashboard_app();
    handle_key(&mut app, key(KeyCode::Char('?')));
    assert!(app.show_help);

    handle_key(&mut app, key(KeyCode::Char('q')));
    assert!(!app.should_quit);

    handle_key(&mut app, key(KeyCode::Esc));
    assert!(!app.show_help);
}
