//! # Dashboard View Model
//!
//! Pure derivations from an [`AnalysisResult`] that the renderer draws.
//! Nothing here re-sorts, re-validates or edits the schedule: day cards and
//! tasks keep the order the model returned.

use crate::planner::types::{AnalysisResult, DailyPlan, ScheduledTask, TaskType};

/// Upper bound of the stress chart.
pub const MAX_STRESS: u64 = 100;

/// Color band of a stress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressBand {
    Low,
    Moderate,
    High,
}

impl StressBand {
    pub fn for_score(score: u64) -> Self {
        if score < 40 {
            StressBand::Low
        } else if score < 70 {
            StressBand::Moderate
        } else {
            StressBand::High
        }
    }
}

/// One bar of the stress-by-day chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressBar {
    pub label: String,
    pub score: u64,
    pub band: StressBand,
}

/// Clamp a model-assigned score into `0..=100` and round it.
pub fn clamp_score(score: f64) -> u64 {
    if score.is_nan() {
        return 0;
    }
    score.clamp(0.0, MAX_STRESS as f64).round() as u64
}

/// The chart series, one bar per day in received order.
pub fn stress_series(result: &AnalysisResult) -> Vec<StressBar> {
    result
        .daily_plans
        .iter()
        .map(|plan| {
            let score = clamp_score(plan.stress_score);
            StressBar {
                label: plan.day.clone(),
                score,
                band: StressBand::for_score(score),
            }
        })
        .collect()
}

/// One card of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCard<'a> {
    pub plan: &'a DailyPlan,
    pub high_pressure: bool,
}

impl DayCard<'_> {
    pub fn is_rest_day(&self) -> bool {
        self.plan.tasks.is_empty()
    }
}

/// Timeline cards, exactly one per daily plan, in received order.
pub fn day_cards(result: &AnalysisResult) -> Vec<DayCard<'_>> {
    result
        .daily_plans
        .iter()
        .map(|plan| DayCard {
            plan,
            high_pressure: result.is_high_pressure(plan),
        })
        .collect()
}

/// Icon shown in front of a task.
pub fn task_icon(kind: TaskType) -> &'static str {
    match kind {
        TaskType::Study => "📖",
        TaskType::Break => "☕",
        TaskType::Deadline => "⏰",
        TaskType::Class => "🏫",
    }
}

/// Human label for a task kind.
pub fn task_label(kind: TaskType) -> &'static str {
    match kind {
        TaskType::Study => "Study",
        TaskType::Break => "Break",
        TaskType::Deadline => "Deadline",
        TaskType::Class => "Class",
    }
}

/// `"30 min"`, or `"due"` for zero-length deadline markers.
pub fn format_duration(task: &ScheduledTask) -> String {
    match (task.kind, task.duration_minutes) {
        (TaskType::Deadline, 0) => "due".to_string(),
        (_, minutes) => format!("{} min", minutes),
    }
}

/// Total planned minutes per task kind for one day, in [`TaskType::ALL`] order.
/// Summed as `u64`: durations come straight from the model.
pub fn minutes_by_kind(plan: &DailyPlan) -> [(TaskType, u64); 4] {
    TaskType::ALL.map(|kind| {
        let total: u64 = plan
            .tasks
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| u64::from(t.duration_minutes))
            .sum();
        (kind, total)
    })
}
