use crate::planner::request::{Completion, PlanRequest, RequestKind};
use crate::planner::types::{AnalysisResult, StudentProfile};
use crate::ui::form::ProfileForm;
use crate::ui::theme::ThemeState;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Dashboard,
}

pub struct App {
    pub screen: Screen,
    pub form: ProfileForm,
    /// Snapshot sent with the last analysis; reused for adjustments.
    pub profile: Option<StudentProfile>,
    pub result: Option<AnalysisResult>,
    pub loading: bool,
    pub adjusting: bool,
    pub error: Option<String>,
    /// Feedback modal text; `Some` while the modal is open.
    pub feedback: Option<String>,
    pub theme: ThemeState,
    pub selected_day: usize,
    pub task_scroll: usize,
    pub show_help: bool,
    pub should_quit: bool,
    /// Date annotation stamped on every submitted profile (`--today`).
    pub current_date: Option<String>,
    /// Frame counter for the spinner.
    pub tick: usize,
}

impl App {
    pub fn new(theme: ThemeState) -> Self {
        Self {
            screen: Screen::Form,
            form: ProfileForm::new(),
            profile: None,
            result: None,
            loading: false,
            adjusting: false,
            error: None,
            feedback: None,
            theme,
            selected_day: 0,
            task_scroll: 0,
            show_help: false,
            should_quit: false,
            current_date: None,
            tick: 0,
        }
    }

    pub fn with_form(mut self, form: ProfileForm) -> Self {
        self.form = form;
        self
    }

    pub fn with_current_date(mut self, current_date: Option<String>) -> Self {
        self.current_date = current_date;
        self
    }

    /// A model call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.loading || self.adjusting
    }

    pub fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Validate the form and produce the analysis request. Returns `None`
    /// while a request is already in flight or when validation fails (the
    /// reason is shown in the error banner).
    pub fn submit_form(&mut self) -> Option<PlanRequest> {
        if self.is_busy() {
            debug!("submit_form: ignored, request in flight");
            return None;
        }
        match self.form.to_profile(self.current_date.clone()) {
            Ok(profile) => {
                info!(courses = profile.courses.len(), "submit_form: profile accepted");
                self.error = None;
                self.loading = true;
                self.profile = Some(profile.clone());
                Some(PlanRequest::Analyze(profile))
            }
            Err(e) => {
                debug!(error = %e, "submit_form: validation failed");
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Abandon an in-flight analysis and go back to editing.
    pub fn cancel_loading(&mut self) {
        if self.loading {
            info!("cancel_loading: analysis abandoned");
            self.loading = false;
        }
    }

    pub fn open_feedback(&mut self) {
        if self.result.is_some() && !self.adjusting {
            self.feedback = Some(String::new());
        }
    }

    pub fn close_feedback(&mut self) {
        if !self.adjusting {
            self.feedback = None;
        }
    }

    pub fn feedback_push_char(&mut self, c: char) {
        if let Some(text) = self.feedback.as_mut() {
            text.push(c);
        }
    }

    pub fn feedback_pop_char(&mut self) {
        if let Some(text) = self.feedback.as_mut() {
            text.pop();
        }
    }

    /// Produce the adjustment request for the open feedback modal. Blank
    /// feedback does nothing. The current result stays on screen until the
    /// new one arrives.
    pub fn submit_feedback(&mut self) -> Option<PlanRequest> {
        if self.adjusting {
            return None;
        }
        let feedback = self.feedback.as_deref()?.trim().to_string();
        if feedback.is_empty() {
            return None;
        }
        let (profile, current) = match (&self.profile, &self.result) {
            (Some(p), Some(r)) => (p.clone(), r.clone()),
            _ => return None,
        };
        info!(feedback_len = feedback.len(), "submit_feedback: adjusting schedule");
        self.error = None;
        self.adjusting = true;
        Some(PlanRequest::Adjust {
            profile,
            current,
            feedback,
        })
    }

    /// Apply a finished model call. Completions nobody is waiting for are
    /// dropped.
    pub fn apply(&mut self, completion: Completion) {
        let Completion { kind, outcome } = completion;
        let waiting = match kind {
            RequestKind::Analyze => self.loading,
            RequestKind::Adjust => self.adjusting,
        };
        if !waiting {
            warn!(?kind, "apply: dropping completion nobody is waiting for");
            return;
        }

        match kind {
            RequestKind::Analyze => self.loading = false,
            RequestKind::Adjust => self.adjusting = false,
        }

        match outcome {
            Ok(result) => {
                info!(?kind, days = result.daily_plans.len(), "apply: schedule updated");
                self.result = Some(result);
                self.error = None;
                self.screen = Screen::Dashboard;
                self.feedback = None;
                self.clamp_selection();
            }
            Err(e) => {
                error!(?kind, error = %e, "apply: model call failed");
                self.error = Some(e.user_message().to_string());
                if kind == RequestKind::Adjust {
                    self.feedback = None;
                }
            }
        }
    }

    /// Back to a fresh form. Clears result, profile and error.
    pub fn reset(&mut self) {
        info!("reset: back to profile form");
        self.screen = Screen::Form;
        self.form = ProfileForm::new();
        self.profile = None;
        self.result = None;
        self.error = None;
        self.feedback = None;
        self.loading = false;
        self.adjusting = false;
        self.selected_day = 0;
        self.task_scroll = 0;
    }

    fn day_count(&self) -> usize {
        self.result.as_ref().map_or(0, |r| r.daily_plans.len())
    }

    fn clamp_selection(&mut self) {
        let count = self.day_count();
        if self.selected_day >= count {
            self.selected_day = count.saturating_sub(1);
        }
        self.task_scroll = 0;
    }

    pub fn next_day(&mut self) {
        let count = self.day_count();
        if count > 0 {
            self.selected_day = (self.selected_day + 1) % count;
            self.task_scroll = 0;
        }
    }

    pub fn previous_day(&mut self) {
        let count = self.day_count();
        if count > 0 {
            self.selected_day = if self.selected_day == 0 {
                count - 1
            } else {
                self.selected_day - 1
            };
            self.task_scroll = 0;
        }
    }

    pub fn scroll_tasks_down(&mut self) {
        let tasks = self
            .result
            .as_ref()
            .and_then(|r| r.daily_plans.get(self.selected_day))
            .map_or(0, |p| p.tasks.len());
        if self.task_scroll < tasks.saturating_sub(1) {
            self.task_scroll += 1;
        }
    }

    pub fn scroll_tasks_up(&mut self) {
        self.task_scroll = self.task_scroll.saturating_sub(1);
    }

    /// Name shown in the dashboard greeting.
    pub fn student_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("there")
    }
}
