//! # Planner Module
//!
//! Everything between a submitted profile and a parsed weekly schedule.
//! There is no scheduling logic here: the hosted model builds the plan, this
//! module only describes what to ask for and checks the shape of the answer.
//!
//! | Piece | Role |
//! |-------|------|
//! | [`types`] | Profile, course and schedule data model |
//! | [`prompt`] | Instruction text and response schema |
//! | [`client`] | [`ModelClient`] trait, [`Planner`], [`ModelError`] |
//! | [`gemini`] | [`GeminiClient`], the production [`ModelClient`] |
//! | [`request`] | [`RequestSlot`], the single in-flight call |

pub mod client;
pub mod gemini;
pub mod prompt;
pub mod request;
pub mod types;

pub use client::{parse_analysis, ModelClient, ModelError, Planner, USER_FACING_ERROR};
pub use gemini::GeminiClient;
pub use prompt::{build_adjustment_request, build_analysis_request, response_schema, PromptRequest};
pub use request::{Completion, PlanRequest, RequestKind, RequestSlot};
pub use types::{
    deadline_label, AnalysisResult, Course, DailyPlan, Deadline, ScheduledTask, StudentProfile,
    TaskType, DEADLINE_LABEL_PREFIX,
};
