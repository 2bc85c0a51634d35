//! Terminal input module (playground-facing).
//!
//! This module maps `crossterm` key events into [`map::InputEvent`]s and
//! provides the single-line command editor the playground types into.
//! It knows nothing about effects; submitted lines are parsed into
//! [`crate::types::Command`] by the caller.

pub mod editor;
pub mod map;

pub use cybermaint_types as types;

pub use editor::LineEditor;
pub use map::{map_key, should_quit, InputEvent};
