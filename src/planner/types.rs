//! # Planner Data Model
//!
//! Types shared by the profile form, the prompt builder and the renderer.
//!
//! Field names serialize in camelCase because the same JSON is embedded in
//! the prompt and returned by the model:
//!
//! ```json
//! {
//!   "dailyPlans": [
//!     {
//!       "day": "Wednesday",
//!       "date": "2024-06-19",
//!       "stressScore": 82,
//!       "tasks": [
//!         { "time": "20:00", "activity": "submission/exam: Calculus", "type": "DEADLINE", "durationMinutes": 0 }
//!       ]
//!     }
//!   ],
//!   "overallAnalysis": "...",
//!   "recommendations": ["..."],
//!   "highPressureDays": ["Wednesday"]
//! }
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Activity prefix the model must use for every `DEADLINE` task.
pub const DEADLINE_LABEL_PREFIX: &str = "submission/exam: ";

/// Build the activity label a `DEADLINE` task must carry for a course.
pub fn deadline_label(course_name: &str) -> String {
    format!("{}{}", DEADLINE_LABEL_PREFIX, course_name)
}

/// A course deadline: a calendar date with an optional time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Deadline {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl Deadline {
    pub fn on(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            Some(time) => write!(f, "{}T{}", self.date.format("%Y-%m-%d"), time.format("%H:%M")),
            None => write!(f, "{}", self.date.format("%Y-%m-%d")),
        }
    }
}

/// Error returned when a deadline string is neither `YYYY-MM-DD` nor
/// `YYYY-MM-DDTHH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid deadline '{0}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM")]
pub struct DeadlineParseError(pub String);

impl FromStr for Deadline {
    type Err = DeadlineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::on(date));
        }
        for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::at(dt.date(), dt.time()));
            }
        }
        Err(DeadlineParseError(s.to_string()))
    }
}

impl TryFrom<String> for Deadline {
    type Error = DeadlineParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Deadline> for String {
    fn from(value: Deadline) -> Self {
        value.to_string()
    }
}

/// A unit of academic work entered in the profile form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: u32,
    pub name: String,
    /// 1 (very easy) to 5 (very hard)
    pub difficulty: u8,
    pub deadline: Deadline,
    pub estimated_hours: f32,
}

/// Snapshot of the user's planning input, sent to the model as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub name: String,
    /// 1 (relaxed) to 10 (overwhelmed)
    pub stress_level: u8,
    pub free_time_per_day: f32,
    pub courses: Vec<Course>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_date: Option<String>,
}

/// Kind of a scheduled task. The model may only return these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Study,
    Break,
    Deadline,
    Class,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [
        TaskType::Study,
        TaskType::Break,
        TaskType::Deadline,
        TaskType::Class,
    ];

    /// Wire name, as used in the response schema enum.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Study => "STUDY",
            TaskType::Break => "BREAK",
            TaskType::Deadline => "DEADLINE",
            TaskType::Class => "CLASS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    /// Time of day, `HH:mm`
    pub time: String,
    pub activity: String,
    #[serde(rename = "type")]
    pub kind: TaskType,
    #[serde(deserialize_with = "whole_minutes")]
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    pub day: String,
    pub date: String,
    /// Model-assigned load, 0-100
    pub stress_score: f64,
    pub tasks: Vec<ScheduledTask>,
}

/// The structured weekly schedule returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub daily_plans: Vec<DailyPlan>,
    pub overall_analysis: String,
    pub recommendations: Vec<String>,
    pub high_pressure_days: Vec<String>,
}

impl AnalysisResult {
    /// Whether the model flagged this day as high pressure, by day label or date.
    pub fn is_high_pressure(&self, plan: &DailyPlan) -> bool {
        let day = plan.day.trim();
        let date = plan.date.trim();
        self.high_pressure_days.iter().any(|flagged| {
            let flagged = flagged.trim();
            flagged == day || flagged == date
        })
    }

    /// Course names that appear in a `DEADLINE` task label, in schedule order.
    pub fn acknowledged_deadlines(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for task in self.daily_plans.iter().flat_map(|p| p.tasks.iter()) {
            match task.kind {
                TaskType::Deadline => {
                    if let Some(name) = task.activity.strip_prefix(DEADLINE_LABEL_PREFIX) {
                        let name = name.trim();
                        if !names.contains(&name) {
                            names.push(name);
                        }
                    }
                }
                TaskType::Study | TaskType::Break | TaskType::Class => {}
            }
        }
        names
    }
}

/// The schema declares `durationMinutes` as a NUMBER, so the model may send
/// `30.0`. Round to whole minutes and reject negatives.
fn whole_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!(
            "durationMinutes out of range: {}",
            value
        )));
    }
    Ok(value.round() as u32)
}
