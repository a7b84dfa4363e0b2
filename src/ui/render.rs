use crate::planner::types::{AnalysisResult, TaskType};
use crate::ui::app::{App, Screen};
use crate::ui::dashboard::{self, DayCard, StressBand};
use crate::ui::form::{difficulty_label, CourseField, FormField, STRESS_RANGE};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Marker placed in front of high-pressure day titles.
pub const HIGH_PRESSURE_MARKER: &str = "⚠";

/// Minimum width of one timeline card.
const DAY_CARD_WIDTH: u16 = 30;

/// Draw the whole UI. The theme is resolved by the caller.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        area,
    );

    let banner_height = if app.error.is_some() { 3 } else { 0 };
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(banner_height), // Error banner
            Constraint::Min(0),                // Body
            Constraint::Length(1),             // Footer
        ])
        .split(area);

    render_header(frame, main_chunks[0], theme);
    if let Some(error) = &app.error {
        render_error_banner(frame, main_chunks[1], error, theme);
    }

    match app.screen {
        Screen::Form => render_form(frame, app, main_chunks[2], theme),
        Screen::Dashboard => render_dashboard(frame, app, main_chunks[2], theme),
    }

    render_footer(frame, app, main_chunks[3], theme);

    if app.adjusting {
        render_adjusting_overlay(frame, app, theme);
    } else if let Some(text) = &app.feedback {
        render_feedback_modal(frame, text, theme);
    }

    if app.show_help {
        render_help(frame, theme);
    }
}

fn spinner(app: &App) -> &'static str {
    SPINNER[app.tick % SPINNER.len()]
}

fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " 🚀 TimePilot AI ",
            Style::default()
                .fg(theme.accent.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Smart study assistant", Style::default().fg(theme.fg_dim)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent.border)),
    );

    frame.render_widget(header, area);
}

fn render_error_banner(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let banner = Paragraph::new(Line::from(Span::styled(
        error.to_string(),
        Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error)),
    )
    .wrap(Wrap { trim: true });

    frame.render_widget(banner, area);
}

// ---------------------------------------------------------------------------
// Profile form
// ---------------------------------------------------------------------------

fn field_style(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default()
            .fg(theme.bg)
            .bg(theme.accent.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg)
    }
}

fn label(text: &str, theme: &Theme) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(theme.fg_dim))
}

fn text_value(value: &str, placeholder: &str, focused: bool, theme: &Theme) -> Span<'static> {
    let shown = if value.is_empty() && !focused {
        placeholder.to_string()
    } else if focused {
        format!("{}▏", value)
    } else {
        value.to_string()
    };
    let mut style = field_style(focused, theme);
    if value.is_empty() && !focused {
        style = style.fg(theme.fg_dim).add_modifier(Modifier::ITALIC);
    }
    Span::styled(format!(" {} ", shown), style)
}

fn stress_gauge(level: u8) -> String {
    let (_, max) = STRESS_RANGE;
    let filled = usize::from(level.min(max));
    format!(
        "{}{} {}/{}",
        "■".repeat(filled),
        "□".repeat(usize::from(max) - filled),
        level,
        max
    )
}

fn render_form(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let form = &app.form;
    let focused = form.focused();
    let is = |field: FormField| focused == field;

    let mut lines: Vec<Line> = Vec::new();
    let mut focus_line = 0usize;

    lines.push(Line::from(Span::styled(
        "Set up your data",
        Style::default()
            .fg(theme.accent.text)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(label(
        "Enter your courses so TimePilot can optimize your week.",
        theme,
    )));
    lines.push(Line::from(""));

    if is(FormField::Name) {
        focus_line = lines.len();
    }
    lines.push(Line::from(vec![
        label("Name            ", theme),
        text_value(&form.name, "Enter your name", is(FormField::Name), theme),
    ]));

    if is(FormField::StressLevel) {
        focus_line = lines.len();
    }
    lines.push(Line::from(vec![
        label("Stress level    ", theme),
        Span::styled(
            format!(" {} ", stress_gauge(form.stress_level)),
            field_style(is(FormField::StressLevel), theme),
        ),
        label("  relaxed ← → stressed", theme),
    ]));

    if is(FormField::FreeTime) {
        focus_line = lines.len();
    }
    lines.push(Line::from(vec![
        label("Free time / day ", theme),
        Span::styled(
            format!(" {:.1} h ", form.free_time),
            field_style(is(FormField::FreeTime), theme),
        ),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            "📚 Courses & deadlines",
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        ),
        label("   Ctrl+N add · Ctrl+D remove", theme),
    ]));

    for (row, course) in form.courses.iter().enumerate() {
        let at = |field: CourseField| is(FormField::Course { row, field });
        if matches!(focused, FormField::Course { row: r, .. } if r == row) {
            focus_line = lines.len();
        }
        lines.push(Line::from(vec![
            label(&format!("{:>2}. ", row + 1), theme),
            text_value(
                &course.name,
                "Course / task name",
                at(CourseField::Name),
                theme,
            ),
            Span::raw(" "),
            Span::styled(
                format!(
                    " {} ({}) ",
                    difficulty_label(course.difficulty),
                    course.difficulty
                ),
                field_style(at(CourseField::Difficulty), theme),
            ),
            Span::raw(" "),
            Span::styled(
                format!(" {:.1} h ", course.estimated_hours),
                field_style(at(CourseField::Hours), theme),
            ),
            Span::raw(" "),
            text_value(
                &course.deadline,
                "YYYY-MM-DD[THH:MM]",
                at(CourseField::Deadline),
                theme,
            ),
        ]));
    }

    lines.push(Line::from(""));
    let button = if app.loading {
        Span::styled(
            format!(" {} Analyzing & optimizing... (Esc to cancel) ", spinner(app)),
            Style::default().fg(theme.bg).bg(theme.accent.hover),
        )
    } else {
        Span::styled(
            " ⏎ Launch TimePilot AI ",
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent.primary)
                .add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(button));

    // Keep the focused line visible when the course list outgrows the pane.
    let inner_height = usize::from(area.height.saturating_sub(2));
    let scroll = if inner_height > 0 && focus_line >= inner_height {
        focus_line + 1 - inner_height
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 📝 Profile ")
                .border_style(Style::default().fg(theme.accent.primary)),
        )
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let Some(result) = &app.result else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Greeting
            Constraint::Length(8),  // Summary cards
            Constraint::Length(10), // Stress chart
            Constraint::Min(6),     // Timeline
        ])
        .split(area);

    let greeting = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Hello, ", Style::default().fg(theme.fg)),
            Span::styled(
                app.student_name().to_string(),
                Style::default()
                    .fg(theme.accent.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" 👋"),
        ]),
        Line::from(label("Here is your optimized plan for this week.", theme)),
    ]);
    frame.render_widget(greeting, chunks[0]);

    render_summary_cards(frame, result, chunks[1], theme);
    render_stress_chart(frame, result, chunks[2], theme);
    render_timeline(frame, app, result, chunks[3], theme);
}

fn render_summary_cards(
    frame: &mut Frame,
    result: &AnalysisResult,
    area: Rect,
    theme: &Theme,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let analysis = Paragraph::new(result.overall_analysis.clone())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 💡 Overall analysis ")
                .border_style(Style::default().fg(theme.accent.border)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(analysis, cols[0]);

    let pressure_lines: Vec<Line> = if result.high_pressure_days.is_empty() {
        vec![Line::from(Span::styled(
            "Your schedule is fairly balanced. No day is seriously overloaded.",
            Style::default().fg(theme.success),
        ))]
    } else {
        let mut lines = vec![Line::from("Pay special attention to:")];
        lines.push(Line::from(
            result
                .high_pressure_days
                .iter()
                .flat_map(|day| {
                    [
                        Span::styled(
                            format!(" {} ", day),
                            Style::default()
                                .fg(theme.error)
                                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                        ),
                        Span::raw(" "),
                    ]
                })
                .collect::<Vec<_>>(),
        ));
        lines.push(Line::from(label(
            "Extra breaks were added on these days.",
            theme,
        )));
        lines
    };
    let pressure = Paragraph::new(pressure_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} Overload warning ", HIGH_PRESSURE_MARKER))
                .border_style(Style::default().fg(theme.error)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(pressure, cols[1]);

    let recommendations: Vec<Line> = result
        .recommendations
        .iter()
        .map(|rec| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(theme.accent.text)),
                Span::raw(rec.clone()),
            ])
        })
        .collect();
    let recs = Paragraph::new(recommendations)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Study tips ")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(recs, cols[2]);
}

fn band_color(band: StressBand, theme: &Theme) -> Color {
    match band {
        StressBand::Low => theme.success,
        StressBand::Moderate => theme.warning,
        StressBand::High => theme.error,
    }
}

fn render_stress_chart(
    frame: &mut Frame,
    result: &AnalysisResult,
    area: Rect,
    theme: &Theme,
) {
    let series = dashboard::stress_series(result);
    let count = u16::try_from(series.len().max(1)).unwrap_or(u16::MAX);
    let gap = 2;
    let bar_width = (area.width.saturating_sub(2) / count)
        .saturating_sub(gap)
        .clamp(3, 12);

    let bars: Vec<Bar> = series
        .iter()
        .map(|bar| {
            let color = band_color(bar.band, theme);
            Bar::default()
                .value(bar.score)
                .label(Line::from(bar.label.clone()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme.bg).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Stress map ")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(gap)
        .max(dashboard::MAX_STRESS);

    frame.render_widget(chart, area);
}

fn task_color(kind: TaskType, theme: &Theme) -> Color {
    match kind {
        TaskType::Study => theme.study,
        TaskType::Break => theme.success,
        TaskType::Deadline => theme.error,
        TaskType::Class => theme.class,
    }
}

/// Title of a timeline card.
pub fn day_card_title(card: &DayCard) -> String {
    if card.high_pressure {
        format!(
            " {} {} · {} ",
            HIGH_PRESSURE_MARKER, card.plan.day, card.plan.date
        )
    } else {
        format!(" {} · {} ", card.plan.day, card.plan.date)
    }
}

fn render_timeline(
    frame: &mut Frame,
    app: &App,
    result: &AnalysisResult,
    area: Rect,
    theme: &Theme,
) {
    let cards = dashboard::day_cards(result);
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!(" 🗓  Optimized timeline ({} days) ", cards.len()))
        .border_style(Style::default().fg(theme.accent.primary));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if cards.is_empty() {
        frame.render_widget(
            Paragraph::new(label("The model returned no days.", theme)),
            inner,
        );
        return;
    }

    // Window of cards that fits, scrolled so the selected day is visible.
    let visible = usize::from((inner.width / DAY_CARD_WIDTH).max(1)).min(cards.len());
    let first = app
        .selected_day
        .saturating_sub(visible - 1)
        .min(cards.len() - visible);

    let constraints = vec![Constraint::Ratio(1, visible as u32); visible];
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (slot, (index, card)) in slots
        .iter()
        .zip(cards.iter().enumerate().skip(first).take(visible))
    {
        let selected = index == app.selected_day;
        render_day_card(frame, card, selected, app.task_scroll, *slot, theme);
    }
}

fn render_day_card(
    frame: &mut Frame,
    card: &DayCard,
    selected: bool,
    task_scroll: usize,
    area: Rect,
    theme: &Theme,
) {
    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
    let border_color = if card.high_pressure {
        title_style = title_style.fg(theme.error);
        theme.error
    } else if selected {
        title_style = title_style.fg(theme.accent.text);
        theme.accent.primary
    } else {
        title_style = title_style.fg(theme.fg);
        theme.fg_dim
    };
    let mut border_style = Style::default().fg(border_color);
    if selected {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }

    let lines: Vec<Line> = if card.is_rest_day() {
        vec![Line::from(label("Rest day", theme))]
    } else {
        card.plan
            .tasks
            .iter()
            .flat_map(|task| {
                let color = task_color(task.kind, theme);
                [
                    Line::from(vec![
                        Span::styled(
                            task.time.clone(),
                            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(" "),
                        Span::raw(dashboard::task_icon(task.kind)),
                        Span::raw(" "),
                        Span::styled(dashboard::task_label(task.kind), Style::default().fg(color)),
                        Span::styled(
                            format!("  {}", dashboard::format_duration(task)),
                            Style::default().fg(theme.fg_dim),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", task.activity),
                        Style::default().fg(color),
                    )),
                ]
            })
            .collect()
    };

    let totals: Vec<Span> = dashboard::minutes_by_kind(card.plan)
        .into_iter()
        .filter(|(kind, minutes)| *minutes > 0 && *kind != TaskType::Deadline)
        .map(|(kind, minutes)| {
            Span::styled(
                format!("{} {}m ", dashboard::task_label(kind), minutes),
                Style::default().fg(task_color(kind, theme)),
            )
        })
        .collect();

    let scroll = if selected { task_scroll * 2 } else { 0 };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(day_card_title(card), title_style))
        .border_style(border_style);
    if !totals.is_empty() {
        block = block.title_bottom(Line::from(totals));
    }
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Footer and modals
// ---------------------------------------------------------------------------

fn render_footer(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let help_text = match app.screen {
        Screen::Form if app.loading => "[Esc] Cancel  [Ctrl+C] Quit".to_string(),
        Screen::Form => {
            "[Tab/↑↓] Field  [←→] Adjust  [Ctrl+N/D] Add/Remove course  [Enter] Submit  [F1] Help  [Esc] Quit"
                .to_string()
        }
        Screen::Dashboard if app.adjusting => "[Ctrl+C] Quit".to_string(),
        Screen::Dashboard if app.feedback.is_some() => {
            "[Enter] Send feedback  [Esc] Close".to_string()
        }
        Screen::Dashboard => {
            "[←→] Day  [↑↓] Scroll  [f] Adjust  [r] Start over  [t] Mode  [c] Accent  [?] Help  [q] Quit"
                .to_string()
        }
    };

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(help_text, Style::default().fg(theme.fg_dim)),
        Span::styled(
            format!("  {} · {}", theme.mode.label(), theme.accent.name),
            Style::default().fg(theme.accent.text),
        ),
    ]));

    frame.render_widget(footer, area);
}

/// A rectangle of at most `width` x `height` centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_feedback_modal(frame: &mut Frame, text: &str, theme: &Theme) {
    let popup = centered_rect(64, 8, frame.area());
    frame.render_widget(Clear, popup);

    let body = Paragraph::new(vec![
        Line::from(label(
            "What should change? e.g. \"less work on Wednesday\"",
            theme,
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}▏", text),
            Style::default().fg(theme.fg),
        )),
        Line::from(""),
        Line::from(label("Enter to send · Esc to cancel", theme)),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" ✍ Adjust schedule ")
            .border_style(Style::default().fg(theme.accent.primary))
            .style(Style::default().bg(theme.surface)),
    )
    .wrap(Wrap { trim: false });

    frame.render_widget(body, popup);
}

fn render_adjusting_overlay(frame: &mut Frame, app: &App, theme: &Theme) {
    let popup = centered_rect(44, 5, frame.area());
    frame.render_widget(Clear, popup);

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} Adjusting your schedule...", spinner(app)),
            Style::default()
                .fg(theme.accent.text)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent.primary))
            .style(Style::default().bg(theme.surface)),
    );

    frame.render_widget(body, popup);
}

fn render_help(frame: &mut Frame, theme: &Theme) {
    let popup = centered_rect(58, 20, frame.area());
    frame.render_widget(Clear, popup);

    let entry = |keys: &str, action: &str| {
        Line::from(vec![
            Span::styled(
                format!("  {:<14}", keys),
                Style::default()
                    .fg(theme.accent.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(action.to_string(), Style::default().fg(theme.fg)),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            "Profile form",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        entry("Tab / ↑↓", "Move between fields"),
        entry("← →  + -", "Adjust numbers and difficulty"),
        entry("Ctrl+N", "Add a course"),
        entry("Ctrl+D", "Remove the focused course"),
        entry("Enter", "Build my schedule"),
        Line::from(""),
        Line::from(Span::styled(
            "Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        entry("← → / h l", "Select day"),
        entry("↑ ↓ / k j", "Scroll the selected day"),
        entry("f", "Ask the AI to adjust the plan"),
        entry("r", "Start over"),
        Line::from(""),
        entry("F2 / t", "Toggle light/dark"),
        entry("F3 / c", "Cycle accent color"),
        entry("Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(label("  Press ? or Esc to close", theme)),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" ❔ Help ")
            .border_style(Style::default().fg(theme.accent.primary))
            .style(Style::default().bg(theme.surface).fg(theme.fg)),
    );

    frame.render_widget(help, popup);
}
