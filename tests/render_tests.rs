//! Rendering tests
//!
//! Draws full frames into ratatui's `TestBackend` and inspects the buffer.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use timepilot::planner::{
    parse_analysis, AnalysisResult, Completion, DailyPlan, RequestKind, ScheduledTask, TaskType,
    USER_FACING_ERROR,
};
use timepilot::ui::form::ProfileForm;
use timepilot::ui::render::HIGH_PRESSURE_MARKER;
use timepilot::ui::theme::{AccentColor, Theme, ThemeMode};
use timepilot::ui::{render, App, ThemeState};

/// Buffer contents as plain text, one line per row.
fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn draw(app: &App, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let theme = app.theme.resolve();
    terminal.draw(|f| render(f, app, &theme)).unwrap();
    terminal.backend().buffer().clone()
}

fn task(time: &str, activity: &str, kind: TaskType, minutes: u32) -> ScheduledTask {
    ScheduledTask {
        time: time.to_string(),
        activity: activity.to_string(),
        kind,
        duration_minutes: minutes,
    }
}

fn result() -> AnalysisResult {
    AnalysisResult {
        daily_plans: vec![
            DailyPlan {
                day: "Mon".to_string(),
                date: "2024-06-17".to_string(),
                stress_score: 85.0,
                tasks: vec![
                    task("18:00", "Calculus drills", TaskType::Study, 90),
                    task("08:00", "Morning walk", TaskType::Break, 20),
                ],
            },
            DailyPlan {
                day: "Tue".to_string(),
                date: "2024-06-18".to_string(),
                stress_score: 30.0,
                tasks: vec![],
            },
            DailyPlan {
                day: "Wed".to_string(),
                date: "2024-06-19".to_string(),
                stress_score: 55.0,
                tasks: vec![task("09:00", "submission/exam: Math", TaskType::Deadline, 0)],
            },
        ],
        overall_analysis: "Math needs the most time.".to_string(),
        recommendations: vec!["Sleep eight hours".to_string()],
        high_pressure_days: vec!["Mon".to_string()],
    }
}

fn dashboard_app(result: AnalysisResult) -> App {
    let mut app = App::new(ThemeState::default()).with_form(ProfileForm::demo());
    app.submit_form().expect("request");
    app.apply(Completion {
        kind: RequestKind::Analyze,
        outcome: Ok(result),
    });
    app
}

#[test]
fn test_form_renders_fields() {
    let app = App::new(ThemeState::default()).with_form(ProfileForm::demo());
    let text = buffer_text(&draw(&app, 120, 30));

    assert!(text.contains("TimePilot AI"));
    assert!(text.contains("Student A"));
    assert!(text.contains("Advanced Mathematics"));
    assert!(text.contains("Very hard (5)"));
    assert!(text.contains("2024-06-18"));
    assert!(text.contains("Launch TimePilot AI"));
}

#[test]
fn test_form_shows_spinner_while_loading() {
    let mut app = App::new(ThemeState::default()).with_form(ProfileForm::demo());
    app.submit_form().expect("request");
    let text = buffer_text(&draw(&app, 120, 30));
    assert!(text.contains("Analyzing & optimizing"));
}

#[test]
fn test_error_banner() {
    let mut app = App::new(ThemeState::default());
    app.error = Some(USER_FACING_ERROR.to_string());
    let text = buffer_text(&draw(&app, 120, 30));
    assert!(text.contains("Could not reach the AI"));
}

#[test]
fn test_one_card_per_day_in_order() {
    let app = dashboard_app(result());
    let text = buffer_text(&draw(&app, 140, 50));

    let mon = text.find("Mon · 2024-06-17").expect("Monday card");
    let tue = text.find("Tue · 2024-06-18").expect("Tuesday card");
    let wed = text.find("Wed · 2024-06-19").expect("Wednesday card");
    assert!(mon < tue && tue < wed);
    assert!(text.contains("(3 days)"));
}

#[test]
fn test_high_pressure_day_is_marked() {
    let app = dashboard_app(result());
    let text = buffer_text(&draw(&app, 140, 50));

    assert!(text.contains(&format!("{} Mon · 2024-06-17", HIGH_PRESSURE_MARKER)));
    assert!(!text.contains(&format!("{} Wed", HIGH_PRESSURE_MARKER)));
}

#[test]
fn test_rest_day_and_task_details() {
    let app = dashboard_app(result());
    let text = buffer_text(&draw(&app, 140, 50));

    assert!(text.contains("Rest day"));
    assert!(text.contains("Calculus drills"));
    assert!(text.contains("90 min"));
    assert!(text.contains("submission/exam: Math"));
    assert!(text.contains("due"));

    // Tasks keep received order inside a card.
    let evening = text.find("18:00").expect("first task");
    let morning = text.find("08:00").expect("second task");
    assert!(evening < morning);
}

#[test]
fn test_summary_cards() {
    let app = dashboard_app(result());
    let text = buffer_text(&draw(&app, 140, 50));

    assert!(text.contains("Hello, Student A"));
    assert!(text.contains("Math needs the most time."));
    assert!(text.contains("Sleep eight hours"));
    assert!(text.contains("Pay special attention to"));
}

#[test]
fn test_balanced_message_without_high_pressure_days() {
    let mut calm = result();
    calm.high_pressure_days.clear();
    let app = dashboard_app(calm);
    let text = buffer_text(&draw(&app, 140, 50));

    assert!(text.contains("fairly balanced"));
    assert!(!text.contains(&format!("{} Mon", HIGH_PRESSURE_MARKER)));
}

#[test]
fn test_feedback_modal_and_overlay() {
    let mut app = dashboard_app(result());
    app.open_feedback();
    for c in "less on Mon".chars() {
        app.feedback_push_char(c);
    }
    let text = buffer_text(&draw(&app, 140, 50));
    assert!(text.contains("Adjust schedule"));
    assert!(text.contains("less on Mon"));

    app.submit_feedback().expect("request");
    let text = buffer_text(&draw(&app, 140, 50));
    assert!(text.contains("Adjusting your schedule..."));
}

#[test]
fn test_help_popup() {
    let mut app = App::new(ThemeState::default());
    app.toggle_help();
    let text = buffer_text(&draw(&app, 120, 40));
    assert!(text.contains("Cycle accent color"));
}

#[test]
fn test_background_uses_theme() {
    let mut app = App::new(ThemeState::new(ThemeMode::Dark, AccentColor::Rose));
    let buffer = draw(&app, 80, 24);
    let dark = Theme::resolve(ThemeMode::Dark, AccentColor::Rose);
    assert_eq!(buffer[(0, 23)].bg, dark.bg);

    app.theme.toggle_mode();
    let buffer = draw(&app, 80, 24);
    let light = Theme::resolve(ThemeMode::Light, AccentColor::Rose);
    assert_eq!(buffer[(0, 23)].bg, light.bg);
    assert_ne!(light.bg, dark.bg);
}

#[test]
fn test_footer_names_theme() {
    let app = App::new(ThemeState::new(ThemeMode::Dark, AccentColor::Violet));
    let text = buffer_text(&draw(&app, 200, 24));
    let theme = Theme::resolve(ThemeMode::Dark, AccentColor::Violet);
    assert!(text.contains(&format!("{} · {}", ThemeMode::Dark.label(), theme.accent.name)));
}

#[test]
fn test_huge_durations_from_model_render() {
    let text = r#"{
        "dailyPlans": [{
            "day": "Mon",
            "date": "2024-06-17",
            "stressScore": 40,
            "tasks": [
                {"time": "09:00", "activity": "Thesis", "type": "STUDY", "durationMinutes": 3000000000},
                {"time": "12:00", "activity": "More thesis", "type": "STUDY", "durationMinutes": 3000000000}
            ]
        }],
        "overallAnalysis": "Long week.",
        "recommendations": [],
        "highPressureDays": []
    }"#;
    let parsed = parse_analysis(text).expect("parse");
    assert_eq!(parsed.daily_plans[0].tasks[0].duration_minutes, 3_000_000_000);

    let app = dashboard_app(parsed);
    let text = buffer_text(&draw(&app, 200, 50));
    assert!(text.contains("3000000000 min"));
    assert!(text.contains("Study 6000000000m"));
}

#[test]
fn test_small_terminal_does_not_panic() {
    let app = dashboard_app(result());
    draw(&app, 20, 8);

    let mut app = App::new(ThemeState::default());
    app.toggle_help();
    draw(&app, 10, 5);
}
