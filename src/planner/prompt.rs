//! # Prompt and Schema Builder
//!
//! Turns a [`StudentProfile`] (and, for adjustments, the current
//! [`AnalysisResult`] plus the user's feedback) into the instruction text
//! sent to the model, and declares the JSON schema the model must answer
//! with.
//!
//! The business rules the model has to honor live here and only here:
//!
//! - start the schedule today or tomorrow, with real calendar dates
//! - nearer deadlines first
//! - a 2-4 hour buffer (or a full day) before every deadline
//! - `DEADLINE` tasks labelled `submission/exam: <course name>`
//! - balance `STUDY` and `BREAK` tasks

use crate::planner::types::{AnalysisResult, StudentProfile, TaskType, DEADLINE_LABEL_PREFIX};
use serde_json::{json, Value};

/// Sampling temperature used when the configuration does not override it.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A fully built model request: instruction text plus output contract.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub prompt: String,
    pub schema: Value,
}

/// The response schema, in the OpenAPI subset the Gemini API accepts.
pub fn response_schema() -> Value {
    let task_types: Vec<&str> = TaskType::ALL.iter().map(|t| t.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "dailyPlans": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "STRING", "description": "Day label, e.g. Monday" },
                        "date": { "type": "STRING", "description": "Date formatted YYYY-MM-DD" },
                        "stressScore": { "type": "NUMBER", "description": "Stress score from 0 to 100" },
                        "tasks": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "time": { "type": "STRING", "description": "HH:mm" },
                                    "activity": { "type": "STRING" },
                                    "type": { "type": "STRING", "enum": task_types },
                                    "durationMinutes": { "type": "NUMBER" }
                                },
                                "required": ["time", "activity", "type", "durationMinutes"]
                            }
                        }
                    },
                    "required": ["day", "date", "stressScore", "tasks"]
                }
            },
            "overallAnalysis": { "type": "STRING" },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } },
            "highPressureDays": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["dailyPlans", "overallAnalysis", "recommendations", "highPressureDays"]
    })
}

/// Time reference written into the prompt: the profile's own annotation if
/// present, otherwise the caller-supplied clock reading.
fn time_reference<'a>(profile: &'a StudentProfile, now: &'a str) -> &'a str {
    profile
        .current_date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(now)
}

/// Build the first-pass request that asks for a fresh weekly schedule.
pub fn build_analysis_request(
    profile: &StudentProfile,
    now: &str,
) -> Result<PromptRequest, serde_json::Error> {
    let profile_json = serde_json::to_string(profile)?;
    let prompt = format!(
        "You are an AI study assistant. Analyze the following student data and build an optimal schedule for the coming week.

CURRENT TIME (IMPORTANT): {now}

Student data (deadlines may include a time of day):
{profile_json}

Important requirements:
1. Start the schedule from the current date or tomorrow.
2. Make sure every date matches the real Gregorian calendar exactly.
3. Prioritize the nearest deadlines.
4. IMPORTANT: Never schedule a submission or review session right before a deadline (no last-minute work). Keep a safety buffer of at least 2-4 hours, or finish a day earlier when possible.
5. Display format: for a due event (task type = DEADLINE) the 'activity' field must read exactly \"{prefix}[course name]\".
6. Balance study and rest (BREAK tasks).
7. Return the result as JSON following the declared schema.",
        now = time_reference(profile, now),
        profile_json = profile_json,
        prefix = DEADLINE_LABEL_PREFIX,
    );

    Ok(PromptRequest {
        prompt,
        schema: response_schema(),
    })
}

/// Build the follow-up request that revises `current` according to `feedback`.
pub fn build_adjustment_request(
    profile: &StudentProfile,
    current: &AnalysisResult,
    feedback: &str,
    now: &str,
) -> Result<PromptRequest, serde_json::Error> {
    let profile_json = serde_json::to_string(profile)?;
    let current_json = serde_json::to_string(current)?;
    let prompt = format!(
        "Based on the current schedule and the student's feedback, adjust the plan.

CURRENT TIME: {now}

Student data:
{profile_json}

Current schedule:
{current_json}

Student feedback (adjustment request):
\"{feedback}\"

Requirements:
1. Keep the same JSON structure.
2. Keep every date accurate to the real calendar.
3. Change the schedule to satisfy the feedback (lighter load, moved hours, ...).
4. Still follow the rules: never schedule right before a deadline, and use the format \"{prefix}[course name]\" for due events.",
        now = time_reference(profile, now),
        profile_json = profile_json,
        current_json = current_json,
        feedback = feedback.trim(),
        prefix = DEADLINE_LABEL_PREFIX,
    );

    Ok(PromptRequest {
        prompt,
        schema: response_schema(),
    })
}
