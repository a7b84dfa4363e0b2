//! # Theme System
//!
//! Two independent preferences decide every color in the UI:
//!
//! - [`ThemeMode`]: light or dark base palette
//! - [`AccentColor`]: emerald, blue, rose, violet or amber
//!
//! [`ThemeState`] holds the preferences for the running session. Rendering
//! never reads it directly: the event loop resolves it into a [`Theme`] once
//! per frame and passes that value to every render function.
//!
//! Light mode uses the Catppuccin Latte base colors, dark mode Catppuccin
//! Mocha. Accent tokens follow the Tailwind 400/500/600 steps.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Light or dark base palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }
}

/// Named accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Emerald,
    Blue,
    Rose,
    Violet,
    Amber,
}

impl AccentColor {
    pub const ALL: [AccentColor; 5] = [
        AccentColor::Emerald,
        AccentColor::Blue,
        AccentColor::Rose,
        AccentColor::Violet,
        AccentColor::Amber,
    ];

    /// The next accent in display order, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn config(self) -> &'static ThemeConfig {
        match self {
            AccentColor::Emerald => &ACCENTS[0],
            AccentColor::Blue => &ACCENTS[1],
            AccentColor::Rose => &ACCENTS[2],
            AccentColor::Violet => &ACCENTS[3],
            AccentColor::Amber => &ACCENTS[4],
        }
    }
}

/// Visual tokens for one accent color.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    /// Human-readable name shown in the footer.
    pub name: &'static str,
    /// Focused borders, selected items, buttons.
    pub primary: Color,
    /// Selected item background while the button is "pressed" (loading).
    pub hover: Color,
    /// Accent-colored text on the base background.
    pub text: Color,
    /// Unfocused accent borders.
    pub border: Color,
}

static ACCENTS: [ThemeConfig; 5] = [
    ThemeConfig {
        name: "Emerald",
        primary: Color::Rgb(16, 185, 129),
        hover: Color::Rgb(5, 150, 105),
        text: Color::Rgb(52, 211, 153),
        border: Color::Rgb(110, 231, 183),
    },
    ThemeConfig {
        name: "Blue",
        primary: Color::Rgb(59, 130, 246),
        hover: Color::Rgb(37, 99, 235),
        text: Color::Rgb(96, 165, 250),
        border: Color::Rgb(147, 197, 253),
    },
    ThemeConfig {
        name: "Rose",
        primary: Color::Rgb(244, 63, 94),
        hover: Color::Rgb(225, 29, 72),
        text: Color::Rgb(251, 113, 133),
        border: Color::Rgb(253, 164, 175),
    },
    ThemeConfig {
        name: "Violet",
        primary: Color::Rgb(139, 92, 246),
        hover: Color::Rgb(124, 58, 237),
        text: Color::Rgb(167, 139, 250),
        border: Color::Rgb(196, 181, 253),
    },
    ThemeConfig {
        name: "Amber",
        primary: Color::Rgb(245, 158, 11),
        hover: Color::Rgb(217, 119, 6),
        text: Color::Rgb(251, 191, 36),
        border: Color::Rgb(252, 211, 77),
    },
];

/// Every color a render function may use, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub accent: &'static ThemeConfig,

    // -- Base palette --
    /// Frame background.
    pub bg: Color,
    /// Card and modal background.
    pub surface: Color,
    /// Primary text.
    pub fg: Color,
    /// Hints, separators, footer.
    pub fg_dim: Color,

    // -- Semantic colors --
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// `STUDY` tasks.
    pub study: Color,
    /// `CLASS` tasks.
    pub class: Color,
}

struct BasePalette {
    bg: Color,
    surface: Color,
    fg: Color,
    fg_dim: Color,
    success: Color,
    warning: Color,
    error: Color,
    study: Color,
    class: Color,
}

static LIGHT: BasePalette = BasePalette {
    bg: Color::Rgb(239, 241, 245),      // latte base
    surface: Color::Rgb(204, 208, 218), // latte surface0
    fg: Color::Rgb(76, 79, 105),        // latte text
    fg_dim: Color::Rgb(156, 160, 176),  // latte overlay0
    success: Color::Rgb(64, 160, 43),   // latte green
    warning: Color::Rgb(223, 142, 29),  // latte yellow
    error: Color::Rgb(210, 15, 57),     // latte red
    study: Color::Rgb(30, 102, 245),    // latte blue
    class: Color::Rgb(136, 57, 239),    // latte mauve
};

static DARK: BasePalette = BasePalette {
    bg: Color::Rgb(30, 30, 46),           // mocha base
    surface: Color::Rgb(49, 50, 68),      // mocha surface0
    fg: Color::Rgb(205, 214, 244),        // mocha text
    fg_dim: Color::Rgb(108, 112, 134),    // mocha overlay0
    success: Color::Rgb(166, 227, 161),   // mocha green
    warning: Color::Rgb(249, 226, 175),   // mocha yellow
    error: Color::Rgb(243, 139, 168),     // mocha red
    study: Color::Rgb(137, 180, 250),     // mocha blue
    class: Color::Rgb(203, 166, 247),     // mocha mauve
};

impl Theme {
    pub fn resolve(mode: ThemeMode, accent: AccentColor) -> Self {
        let base = match mode {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        };
        Self {
            mode,
            accent: accent.config(),
            bg: base.bg,
            surface: base.surface,
            fg: base.fg,
            fg_dim: base.fg_dim,
            success: base.success,
            warning: base.warning,
            error: base.error,
            study: base.study,
            class: base.class,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::resolve(ThemeMode::default(), AccentColor::default())
    }
}

/// Session-scoped theme preferences. Never written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub accent: AccentColor,
}

impl ThemeState {
    pub fn new(mode: ThemeMode, accent: AccentColor) -> Self {
        Self { mode, accent }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    pub fn set_accent(&mut self, accent: AccentColor) {
        self.accent = accent;
    }

    pub fn cycle_accent(&mut self) {
        self.accent = self.accent.next();
    }

    pub fn resolve(&self) -> Theme {
        Theme::resolve(self.mode, self.accent)
    }
}
