//! Runtime services around the effect engine.
//!
//! - [`config`]: `CYBERMAINT_*` environment configuration
//! - [`logging`]: file logger setup (the terminal is never a log sink)
//! - [`sound`]: fire-and-forget audio trigger
//! - [`journal`]: JSONL effect lifecycle journal
//! - [`driver`]: tokio task that owns a scheduler and serializes every mutation
//!
//! # Environment Variables
//!
//! - `CYBERMAINT_SEED`: glitch random seed (default: from the clock)
//! - `CYBERMAINT_GLITCH_MS`: playground glitch duration (default: 2000)
//! - `CYBERMAINT_COUNTDOWN_SECS`: playground countdown start (default: 10)
//! - `CYBERMAINT_TYPING_MS` / `CYBERMAINT_SCROLL_MS`: tick intervals (default: 50 / 100)
//! - `CYBERMAINT_SOUND_FILE` / `CYBERMAINT_SOUND_PLAYER`: audio trigger
//! - `CYBERMAINT_LOG_PATH` / `CYBERMAINT_LOG_LEVEL`: diagnostics log (off by default)
//! - `CYBERMAINT_JOURNAL_PATH`: effect journal (off by default)

pub mod config;
pub mod driver;
pub mod journal;
pub mod logging;
pub mod sound;

pub use cybermaint_core as core;
pub use cybermaint_types as types;

pub use config::Config;
pub use driver::Driver;
pub use journal::{EffectJournal, JournalEvent, JournalRecord};
pub use sound::{default_player, play_sound};
