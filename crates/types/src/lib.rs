//! Core types module - shared constants and small value types
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, making them usable
//! from the effect engine, the terminal view, and the playground host alike.
//!
//! # Effect Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TYPING_TICK_MS` | 50 | Interval between revealed characters |
//! | `GLITCH_TICK_MS` | 50 | Interval between corruption frames |
//! | `GLITCH_DURATION_MS` | 500 | Total glitch duration before restoration |
//! | `SCROLL_TICK_MS` | 100 | Interval between appended feed lines |
//! | `COUNTDOWN_TICK_MS` | 1000 | One countdown step (fixed) |
//!
//! # Examples
//!
//! ```
//! use cybermaint_types::{Command, EffectKind, TickControl};
//!
//! // Commands parse case-insensitively, with a fallback for anything unknown.
//! assert_eq!(Command::from_str("GLITCH"), Command::Glitch);
//! assert_eq!(
//!     Command::from_str("hack"),
//!     Command::Unknown("hack".to_string())
//! );
//!
//! assert_eq!(EffectKind::Countdown.as_str(), "countdown");
//! assert!(TickControl::Continue.is_continue());
//! ```

/// Typing effect tick interval (one character per tick).
pub const TYPING_TICK_MS: u32 = 50;

/// Glitch effect tick interval (one corruption frame per tick).
pub const GLITCH_TICK_MS: u32 = 50;

/// Default total glitch duration before the snapshot is restored.
pub const GLITCH_DURATION_MS: u32 = 500;

/// Scroll effect tick interval (one line per tick).
pub const SCROLL_TICK_MS: u32 = 100;

/// Countdown tick interval. Not configurable: one tick is one second.
pub const COUNTDOWN_TICK_MS: u32 = 1000;

/// Per-character probability that a glitch frame substitutes the character.
pub const CORRUPTION_PROBABILITY: f64 = 0.1;

/// Characters a glitch frame substitutes in.
pub const GLITCH_ALPHABET: [char; 6] = ['#', '%', '&', '@', '!', '*'];

/// Default countdown template. `{n}` is replaced by the remaining seconds.
pub const COUNTDOWN_TEMPLATE: &str = "Time remaining: {n} seconds";

/// Glitch duration used by the playground's `glitch` command.
pub const PLAYGROUND_GLITCH_MS: u32 = 2000;

/// Seconds counted by the playground's `countdown` command.
pub const COUNTDOWN_SECS: i64 = 10;


/// The built-in effect families.
///
/// `Custom` covers effects built from a closure with `effect::from_fn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Typing,
    Glitch,
    Scroll,
    Countdown,
    Custom,
}

impl EffectKind {
    /// Lowercase name, used in logs and the effect journal.
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Typing => "typing",
            EffectKind::Glitch => "glitch",
            EffectKind::Scroll => "scroll",
            EffectKind::Countdown => "countdown",
            EffectKind::Custom => "custom",
        }
    }

    /// Restoring effects must put the buffer back the way they found it.
    pub fn is_restoring(&self) -> bool {
        matches!(self, EffectKind::Glitch)
    }
}

/// Signal returned by every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

impl TickControl {
    pub fn is_continue(&self) -> bool {
        matches!(self, TickControl::Continue)
    }
}

/// Why a running effect was torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The effect returned [`TickControl::Stop`] itself.
    Completed,
    /// The owner cancelled the effect's handle.
    Cancelled,
    /// A tick returned an error.
    Failed,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Completed => "completed",
            StopReason::Cancelled => "cancelled",
            StopReason::Failed => "failed",
        }
    }
}

/// Playground commands, one per input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type,
    Glitch,
    Sound,
    Countdown,
    Box,
    Scroll,
    Help,
    Clear,
    Exit,
    /// Anything else, kept verbatim (trimmed) for the error message.
    Unknown(String),
}

impl Command {
    /// Every recognized command, in help-text order.
    pub const ALL: [Command; 9] = [
        Command::Type,
        Command::Glitch,
        Command::Sound,
        Command::Countdown,
        Command::Box,
        Command::Scroll,
        Command::Help,
        Command::Clear,
        Command::Exit,
    ];

    /// Parse a command line (case-insensitive, surrounding whitespace ignored).
    ///
    /// # Examples
    ///
    /// ```
    /// use cybermaint_types::Command;
    ///
    /// assert_eq!(Command::from_str("box"), Command::Box);
    /// assert_eq!(Command::from_str("HELP"), Command::Help);
    /// ```
    pub fn from_str(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "type" => Command::Type,
            "glitch" => Command::Glitch,
            "sound" => Command::Sound,
            "countdown" => Command::Countdown,
            "box" => Command::Box,
            "scroll" => Command::Scroll,
            "help" => Command::Help,
            "clear" => Command::Clear,
            "exit" => Command::Exit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Command::Type => "type",
            Command::Glitch => "glitch",
            Command::Sound => "sound",
            Command::Countdown => "countdown",
            Command::Box => "box",
            Command::Scroll => "scroll",
            Command::Help => "help",
            Command::Clear => "clear",
            Command::Exit => "exit",
            Command::Unknown(s) => s,
        }
    }
}
