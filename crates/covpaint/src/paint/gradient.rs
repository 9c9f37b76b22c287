//! Coverage percentage to terminal color.
//!
//! Uncovered code is always plain red so it never blends into a low step of
//! the gradient. Fully covered code gets the high end color in bold.
//! Everything in between is quantized to one of ten steps between the two
//! gradient endpoints.

use std::fmt;
use std::str::FromStr;

/// Number of quantization steps between the gradient endpoints
pub const STEPS: u8 = 10;

/// Output mode for terminal rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// ANSI true-color (24-bit) output
    #[default]
    RichAnsi,
    /// Text only, no escape sequences
    Plain,
}

impl OutputMode {
    /// Pick a mode from a color decision
    #[must_use]
    pub const fn from_color(color: bool) -> Self {
        if color {
            Self::RichAnsi
        } else {
            Self::Plain
        }
    }
}

/// ANSI escape codes for terminal output
pub mod ansi {
    /// Reset all attributes
    pub const RESET: &str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &str = "\x1b[1m";
    /// Red foreground, used for never-executed code
    pub const RED: &str = "\x1b[31m";
    /// Bright white foreground, used for uninstrumented text
    pub const BRIGHT_WHITE: &str = "\x1b[97m";

    /// RGB foreground color
    #[must_use]
    pub fn rgb_fg(r: u8, g: u8, b: u8) -> String {
        format!("\x1b[38;2;{r};{g};{b}m")
    }
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create color from hex value
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Move `step` tenths of the way from `self` towards `to`.
    ///
    /// Channels are truncated, not rounded.
    #[must_use]
    pub fn fade(self, to: Self, step: u8) -> Self {
        let channel = |from: u8, to: u8| {
            let from = f32::from(from);
            let delta = (f32::from(to) - from) / f32::from(STEPS);
            (from + delta * f32::from(step)) as u8
        };
        Self {
            r: channel(self.r, to.r),
            g: channel(self.g, to.g),
            b: channel(self.b, to.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    /// Parse `#rrggbb` or `rrggbb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("expected 6 hex digits, got {s:?}"));
        }
        u32::from_str_radix(hex, 16)
            .map(Self::from_hex)
            .map_err(|_| format!("invalid hex color {s:?}"))
    }
}

/// How a run of text is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Not instrumented (blank lines, braces, comments)
    Neutral,
    /// Instrumented but never executed
    Uncovered,
    /// One of the ten gradient steps (0..=9)
    Step(u8, Rgb),
    /// Coverage above 99%
    Full(Rgb),
}

impl Tint {
    /// Visual intensity: 0 uncovered, 1..=10 gradient steps, 11 full.
    /// `None` for uninstrumented text.
    #[must_use]
    pub const fn intensity(self) -> Option<u8> {
        match self {
            Self::Neutral => None,
            Self::Uncovered => Some(0),
            Self::Step(step, _) => Some(step + 1),
            Self::Full(_) => Some(STEPS + 1),
        }
    }

    /// Wrap `text` in the escape sequences for this tint
    #[must_use]
    pub fn paint(self, text: &str, mode: OutputMode) -> String {
        if mode == OutputMode::Plain {
            return text.to_string();
        }
        match self {
            Self::Neutral => format!("{}{text}{}", ansi::BRIGHT_WHITE, ansi::RESET),
            Self::Uncovered => format!("{}{text}{}", ansi::RED, ansi::RESET),
            Self::Step(_, c) => format!("{}{text}{}", ansi::rgb_fg(c.r, c.g, c.b), ansi::RESET),
            Self::Full(c) => format!(
                "{}{}{text}{}",
                ansi::rgb_fg(c.r, c.g, c.b),
                ansi::BOLD,
                ansi::RESET
            ),
        }
    }
}

/// Two-color coverage gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    /// Color at the lowest non-zero step
    pub low: Rgb,
    /// Color at full coverage
    pub high: Rgb,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            low: Rgb::new(171, 200, 170),
            high: Rgb::new(42, 119, 11),
        }
    }
}

impl Gradient {
    /// Create a gradient between two colors
    #[must_use]
    pub const fn new(low: Rgb, high: Rgb) -> Self {
        Self { low, high }
    }

    /// Color of gradient step `step` (0..=9)
    #[must_use]
    pub fn step_color(&self, step: u8) -> Rgb {
        self.low.fade(self.high, step.min(STEPS - 1))
    }

    /// Classify a coverage percentage (0..=100)
    #[must_use]
    pub fn tint(&self, percent: f64) -> Tint {
        if percent <= 0.0 {
            Tint::Uncovered
        } else if percent > 99.0 {
            Tint::Full(self.high)
        } else {
            let step = ((percent / 10.0).floor() as u8).min(STEPS - 1);
            Tint::Step(step, self.step_color(step))
        }
    }

    /// Paint `text` for a coverage percentage
    #[must_use]
    pub fn color_for(&self, text: &str, percent: f64, mode: OutputMode) -> String {
        self.tint(percent).paint(text, mode)
    }

    /// Sample lines showing how percentages are painted
    #[must_use]
    pub fn legend(&self, mode: OutputMode) -> Vec<String> {
        let mut lines = Vec::new();
        for i in (0..=10).step_by(2) {
            let percent = f64::from(i) / 10.0;
            lines.push(format!("{percent:.1}% {}", self.color_for("test", percent, mode)));
        }
        for i in (5..=100).step_by(5) {
            lines.push(format!("{i}% {}", self.color_for("test", f64::from(i), mode)));
        }
        lines
    }
}
