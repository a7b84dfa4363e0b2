//! # Request Slot
//!
//! Holds at most one outstanding model call. Starting a new call aborts the
//! previous task and drops its result channel, so a superseded completion
//! can never reach the UI.
//!
//! The event loop polls the slot once per frame with [`RequestSlot::poll`];
//! nothing here blocks.

use crate::planner::client::{ModelError, Planner};
use crate::planner::types::{AnalysisResult, StudentProfile};
use std::future::Future;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Which user action a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Analyze,
    Adjust,
}

/// An outbound request produced by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanRequest {
    Analyze(StudentProfile),
    Adjust {
        profile: StudentProfile,
        current: AnalysisResult,
        feedback: String,
    },
}

impl PlanRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            PlanRequest::Analyze(_) => RequestKind::Analyze,
            PlanRequest::Adjust { .. } => RequestKind::Adjust,
        }
    }

    /// Run this request against the planner.
    pub async fn run(self, planner: Planner) -> Result<AnalysisResult, ModelError> {
        match self {
            PlanRequest::Analyze(profile) => planner.analyze(&profile).await,
            PlanRequest::Adjust {
                profile,
                current,
                feedback,
            } => planner.adjust(&profile, &current, &feedback).await,
        }
    }
}

/// A finished request, ready to be applied to the app state.
#[derive(Debug)]
pub struct Completion {
    pub kind: RequestKind,
    pub outcome: Result<AnalysisResult, ModelError>,
}

struct InFlight {
    kind: RequestKind,
    task: JoinHandle<()>,
    rx: oneshot::Receiver<Result<AnalysisResult, ModelError>>,
}

/// Single-slot owner of the in-flight model call.
#[derive(Default)]
pub struct RequestSlot {
    inflight: Option<InFlight>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.inflight.is_some()
    }

    pub fn kind(&self) -> Option<RequestKind> {
        self.inflight.as_ref().map(|f| f.kind)
    }

    /// Spawn `work` on the current tokio runtime, superseding any call
    /// already in flight.
    pub fn start<F>(&mut self, kind: RequestKind, work: F)
    where
        F: Future<Output = Result<AnalysisResult, ModelError>> + Send + 'static,
    {
        if let Some(previous) = self.inflight.take() {
            warn!(?previous.kind, ?kind, "request superseded");
            previous.task.abort();
        }

        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            // The receiver is gone when the request was superseded or cancelled.
            let _ = tx.send(work.await);
        });
        debug!(?kind, "request started");
        self.inflight = Some(InFlight { kind, task, rx });
    }

    /// Abort the in-flight call, if any. Its result is discarded.
    pub fn cancel(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            debug!(kind = ?inflight.kind, "request cancelled");
            inflight.task.abort();
        }
    }

    /// Take the completed result, if the in-flight call has finished.
    pub fn poll(&mut self) -> Option<Completion> {
        let inflight = self.inflight.as_mut()?;
        let kind = inflight.kind;
        match inflight.rx.try_recv() {
            Ok(outcome) => {
                self.inflight = None;
                Some(Completion { kind, outcome })
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                // The task died without sending (panic or abort).
                warn!(?kind, "request task ended without a result");
                self.inflight = None;
                Some(Completion {
                    kind,
                    outcome: Err(ModelError::EmptyResponse),
                })
            }
        }
    }
}

impl Drop for RequestSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn empty_result(summary: &str) -> AnalysisResult {
        AnalysisResult {
            daily_plans: vec![],
            overall_analysis: summary.to_string(),
            recommendations: vec![],
            high_pressure_days: vec![],
        }
    }

    async fn wait_for(slot: &mut RequestSlot) -> Completion {
        for _ in 0..200 {
            if let Some(done) = slot.poll() {
                return done;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("request never completed");
    }

    #[tokio::test]
    async fn test_poll_returns_result_once() {
        let mut slot = RequestSlot::new();
        slot.start(RequestKind::Analyze, async { Ok(empty_result("first")) });
        assert!(slot.is_busy());

        let done = wait_for(&mut slot).await;
        assert_eq!(done.kind, RequestKind::Analyze);
        assert_eq!(done.outcome.expect("ok").overall_analysis, "first");
        assert!(!slot.is_busy());
        assert!(slot.poll().is_none());
    }

    #[tokio::test]
    async fn test_new_request_supersedes_old() {
        let mut slot = RequestSlot::new();
        slot.start(RequestKind::Analyze, async {
            std::future::pending::<()>().await;
            Ok(empty_result("stale"))
        });
        slot.start(RequestKind::Adjust, async { Ok(empty_result("fresh")) });
        assert_eq!(slot.kind(), Some(RequestKind::Adjust));

        let done = wait_for(&mut slot).await;
        assert_eq!(done.kind, RequestKind::Adjust);
        assert_eq!(done.outcome.expect("ok").overall_analysis, "fresh");
    }

    #[tokio::test]
    async fn test_cancel_discards_result() {
        let mut slot = RequestSlot::new();
        slot.start(RequestKind::Analyze, async { Ok(empty_result("late")) });
        slot.cancel();
        assert!(!slot.is_busy());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(slot.poll().is_none());
    }

    #[tokio::test]
    async fn test_failure_is_delivered() {
        let mut slot = RequestSlot::new();
        slot.start(RequestKind::Adjust, async { Err(ModelError::MissingApiKey) });
        let done = wait_for(&mut slot).await;
        assert!(matches!(done.outcome, Err(ModelError::MissingApiKey)));
    }
}
