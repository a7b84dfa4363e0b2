//! # Model Client
//!
//! The [`ModelClient`] trait is the seam between the app and the hosted
//! model. [`Planner`] sits on top of it: it builds the prompt, makes exactly
//! one call, and parses the returned text into an [`AnalysisResult`].

use crate::planner::prompt::{self, PromptRequest};
use crate::planner::types::{AnalysisResult, StudentProfile};
use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// The only failure text the end user ever sees.
pub const USER_FACING_ERROR: &str = "Could not reach the AI. Check the API key or try again later.";

/// Everything that can go wrong between building a prompt and holding a
/// parsed result.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("response is not a valid schedule: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ModelError {
    /// All failures collapse to one message; the detail goes to the log.
    pub fn user_message(&self) -> &'static str {
        USER_FACING_ERROR
    }
}

/// A hosted model that answers a prompt with JSON text matching a schema.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send one request. Returns the raw response text.
    async fn generate(&self, request: &PromptRequest) -> Result<String, ModelError>;
}

/// Parse model output into a result. Blank text is a failure, not an empty
/// schedule.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, ModelError> {
    if text.trim().is_empty() {
        return Err(ModelError::EmptyResponse);
    }
    Ok(serde_json::from_str(text)?)
}

/// Local clock reading used when a profile carries no date annotation.
fn clock_reading() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Orchestrates the two model calls the app makes.
#[derive(Clone)]
pub struct Planner {
    client: Arc<dyn ModelClient>,
}

impl Planner {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Ask the model for a fresh weekly schedule.
    pub async fn analyze(&self, profile: &StudentProfile) -> Result<AnalysisResult, ModelError> {
        info!(courses = profile.courses.len(), "analyze: requesting schedule");
        let request = prompt::build_analysis_request(profile, &clock_reading())?;
        debug!(prompt_len = request.prompt.len(), "analyze: prompt built");
        let text = self.client.generate(&request).await?;
        let result = parse_analysis(&text)?;
        info!(days = result.daily_plans.len(), "analyze: schedule received");
        Ok(result)
    }

    /// Ask the model to revise `current` according to `feedback`.
    pub async fn adjust(
        &self,
        profile: &StudentProfile,
        current: &AnalysisResult,
        feedback: &str,
    ) -> Result<AnalysisResult, ModelError> {
        info!(feedback_len = feedback.len(), "adjust: requesting revision");
        let request =
            prompt::build_adjustment_request(profile, current, feedback, &clock_reading())?;
        debug!(prompt_len = request.prompt.len(), "adjust: prompt built");
        let text = self.client.generate(&request).await?;
        let result = parse_analysis(&text)?;
        info!(days = result.daily_plans.len(), "adjust: revision received");
        Ok(result)
    }
}
