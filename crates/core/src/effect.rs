//! The `Effect` trait: what a timed mutator drives.
//!
//! An effect is a small state machine. It sees the target surface only while
//! the engine calls into it, and it never keeps a reference between ticks.

use crate::error::EffectError;
use crate::surface::Surface;
use crate::types::{EffectKind, StopReason, TickControl};

pub trait Effect: Send {
    fn kind(&self) -> EffectKind;

    /// Period between ticks, in milliseconds.
    fn interval_ms(&self) -> u32;

    /// Called once when the effect is spawned, before any tick.
    fn begin(&mut self, _surface: &mut dyn Surface) {}

    /// One scheduled mutation. `index` starts at 0 and increases by one.
    fn tick(&mut self, index: u64, surface: &mut dyn Surface) -> Result<TickControl, EffectError>;

    /// Called exactly once on teardown, whatever the reason.
    fn end(&mut self, _surface: &mut dyn Surface, _reason: StopReason) {}
}

/// Closure-backed effect, see [`from_fn`].
pub struct FnEffect<F> {
    interval_ms: u32,
    on_tick: F,
}

/// Build a custom effect from an `on_tick` closure.
///
/// ```
/// use cybermaint_core::effect::from_fn;
/// use cybermaint_core::{Surface, TextBuffer, Scheduler, TimedMutator, whole};
/// use cybermaint_core::types::TickControl;
///
/// let blink = from_fn(250, |index, surface: &mut dyn Surface| {
///     surface.set_content(if index % 2 == 0 { "_" } else { "" });
///     Ok(if index < 3 { TickControl::Continue } else { TickControl::Stop })
/// });
///
/// let mut buf = TextBuffer::new();
/// let mut scheduler = Scheduler::new();
/// scheduler.spawn(&mut buf, TimedMutator::new(blink, whole));
/// scheduler.advance(1000, &mut buf);
/// assert!(scheduler.is_idle());
/// assert_eq!(buf.content(), "");
/// ```
pub fn from_fn<F>(interval_ms: u32, on_tick: F) -> FnEffect<F>
where
    F: FnMut(u64, &mut dyn Surface) -> Result<TickControl, EffectError> + Send,
{
    FnEffect {
        interval_ms,
        on_tick,
    }
}

impl<F> Effect for FnEffect<F>
where
    F: FnMut(u64, &mut dyn Surface) -> Result<TickControl, EffectError> + Send,
{
    fn kind(&self) -> EffectKind {
        EffectKind::Custom
    }

    fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn tick(&mut self, index: u64, surface: &mut dyn Surface) -> Result<TickControl, EffectError> {
        (self.on_tick)(index, surface)
    }
}
