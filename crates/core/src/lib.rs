//! Core effect engine - deterministic, host-driven, and testable
//!
//! This crate contains the timed mutation engine and the effects built on it.
//! It has **no dependencies** on the terminal, the input loop, or async
//! runtimes, making it:
//!
//! - **Deterministic**: Same seed and same elapsed times produce identical frames
//! - **Testable**: Effects run against an in-memory [`TextBuffer`]
//! - **Portable**: Any loop that can measure elapsed milliseconds can drive it
//!
//! # Module Structure
//!
//! - [`surface`]: the buffer capability effects mutate, plus [`TextBuffer`]
//! - [`effect`]: the [`Effect`] trait and closure-backed custom effects
//! - [`mutator`]: [`TimedMutator`], the periodic engine with a single teardown path
//! - [`scheduler`]: every running effect for one host display
//! - [`typing`], [`glitch`], [`scroll`], [`countdown`]: the built-in effects
//! - [`border`]: the bordered-text formatter
//! - [`rng`]: injectable random source and a seeded LCG
//!
//! # Effect Rules
//!
//! - **Sequential ticks**: one instance never runs two ticks at once, and tick
//!   indices increase by one
//! - **Single teardown**: completion, cancellation and failure share one
//!   idempotent exit path
//! - **Completion once**: the completion callback runs after the final tick's
//!   mutation, and only on natural completion
//! - **Restoration**: a glitch writes its snapshot back however it ends
//!
//! # Example
//!
//! ```
//! use cybermaint_core::{whole, Scheduler, Surface, TextBuffer, TimedMutator, Typing};
//!
//! let mut buf = TextBuffer::new();
//! let mut scheduler = Scheduler::new();
//!
//! let typing = TimedMutator::new(Typing::new("Hello, Operator."), whole)
//!     .on_complete(|buf: &mut TextBuffer| buf.append_line("ready"));
//! scheduler.spawn(&mut buf, typing);
//!
//! // 17 ticks of 50ms reveal all 16 chars.
//! scheduler.advance(17 * 50, &mut buf);
//! assert_eq!(buf.content(), "Hello, Operator.\nready");
//! assert!(scheduler.is_idle());
//! ```

pub mod border;
pub mod countdown;
pub mod effect;
pub mod error;
pub mod glitch;
pub mod handle;
pub mod mutator;
pub mod rng;
pub mod scheduler;
pub mod scroll;
pub mod surface;
pub mod typing;

pub use cybermaint_types as types;

// Re-export commonly used types for convenience
pub use border::ascii_box;
pub use countdown::Countdown;
pub use effect::{from_fn, Effect};
pub use error::EffectError;
pub use glitch::{corrupt, Glitch, GlitchParams};
pub use handle::{EffectHandle, EffectId, HandleState};
pub use mutator::{Completion, Step, TimedMutator};
pub use rng::{RandomSource, SimpleRng};
pub use scheduler::{Finished, Report, Scheduler};
pub use scroll::Scroll;
pub use surface::{whole, Surface, Target, TextBuffer};
pub use typing::Typing;
