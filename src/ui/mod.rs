//! # UI Module
//!
//! Terminal user interface for TimePilot.
//!
//! ## Components
//!
//! - [`App`] - Application state (screen, form, result, loading flags, theme)
//! - [`form`] - Profile form editing and validation
//! - [`dashboard`] - View model derived from an analysis result
//! - [`input`] - Key handling
//! - [`mod@render`] - Rendering functions for drawing the TUI
//! - [`theme`] - Light/dark mode and accent palettes
//! - [`config`] - Persistent settings
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    Header                        │
//! ├─────────────────────────────────────────────────┤
//! │               Error banner (optional)            │
//! ├─────────────────────────────────────────────────┤
//! │  Form screen          or   Dashboard             │
//! │  (name, stress,            greeting              │
//! │   free time,               summary cards (x3)    │
//! │   course rows)             stress chart          │
//! │                            day timeline          │
//! ├─────────────────────────────────────────────────┤
//! │                    Footer                        │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod dashboard;
pub mod form;
pub mod input;
pub mod render;
pub mod theme;

pub use app::{App, Screen};
pub use input::{handle_key, KeyOutcome};
pub use render::render;
pub use theme::{Theme, ThemeState};
