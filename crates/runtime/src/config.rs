//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use log::LevelFilter;

use crate::sound::default_player;
use crate::types::{COUNTDOWN_SECS, PLAYGROUND_GLITCH_MS, SCROLL_TICK_MS, TYPING_TICK_MS};

pub const DEFAULT_SOUND_FILE: &str = "path/to/your/sound/file.mp3";

/// Playground configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Seed for the glitch random source.
    pub seed: u32,
    pub glitch_duration_ms: u32,
    pub countdown_secs: i64,
    pub typing_interval_ms: u32,
    pub scroll_interval_ms: u32,
    pub sound_file: String,
    pub sound_player: String,
    /// Diagnostics log file. Logging is off without one.
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// JSONL effect journal.
    pub journal_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 1,
            glitch_duration_ms: PLAYGROUND_GLITCH_MS,
            countdown_secs: COUNTDOWN_SECS,
            typing_interval_ms: TYPING_TICK_MS,
            scroll_interval_ms: SCROLL_TICK_MS,
            sound_file: DEFAULT_SOUND_FILE.to_string(),
            sound_player: default_player().to_string(),
            log_path: None,
            log_level: LevelFilter::Info,
            journal_path: None,
        }
    }
}

impl Config {
    /// Read `CYBERMAINT_*` variables. Missing or unparsable values use the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            seed: parse(&lookup, "CYBERMAINT_SEED").unwrap_or_else(clock_seed),
            glitch_duration_ms: parse(&lookup, "CYBERMAINT_GLITCH_MS")
                .unwrap_or(defaults.glitch_duration_ms),
            countdown_secs: parse(&lookup, "CYBERMAINT_COUNTDOWN_SECS")
                .unwrap_or(defaults.countdown_secs),
            typing_interval_ms: parse(&lookup, "CYBERMAINT_TYPING_MS")
                .unwrap_or(defaults.typing_interval_ms),
            scroll_interval_ms: parse(&lookup, "CYBERMAINT_SCROLL_MS")
                .unwrap_or(defaults.scroll_interval_ms),
            sound_file: text("CYBERMAINT_SOUND_FILE").unwrap_or(defaults.sound_file),
            sound_player: text("CYBERMAINT_SOUND_PLAYER").unwrap_or(defaults.sound_player),
            log_path: text("CYBERMAINT_LOG_PATH").map(PathBuf::from),
            log_level: parse(&lookup, "CYBERMAINT_LOG_LEVEL").unwrap_or(defaults.log_level),
            journal_path: text("CYBERMAINT_JOURNAL_PATH").map(PathBuf::from),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
