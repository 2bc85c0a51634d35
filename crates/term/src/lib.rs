//! Terminal rendering for the playground.
//!
//! Renders into a simple framebuffer that is flushed to the terminal with
//! crossterm. No widget toolkit: the layout is small enough to place by hand.
//!
//! Goals:
//! - Keep `core` free of terminal concerns
//! - Keep the view pure so layouts can be asserted in unit tests
//! - Only emit the cells that changed between frames

pub mod fb;
pub mod renderer;
pub mod view;

pub use cybermaint_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer, WINDOW_TITLE};
pub use view::{Layout, PlaygroundView, ScreenSnapshot, Viewport};
