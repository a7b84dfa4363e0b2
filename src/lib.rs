//! TimePilot - a terminal study planner
//!
//! This library provides the pieces behind the `timepilot` binary: the
//! planner (profile model, prompt/schema contract and the hosted-model client)
//! and the terminal UI (profile form, dashboard, theming).

pub mod planner;
pub mod ui;
