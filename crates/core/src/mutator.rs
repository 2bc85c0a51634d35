//! Timed mutator - the generic periodic engine behind every effect.
//!
//! The mutator is driven by the host: each call to [`TimedMutator::advance`]
//! adds elapsed time and fires one tick per whole interval, strictly in
//! order. There is no background thread. Between calls nothing belonging to
//! the effect runs, so the host loop is free to serve input.
//!
//! Teardown is the single exit path. Completion, cancellation and tick
//! failure all go through it; it runs at most once and it always calls
//! [`Effect::end`], so restoring effects restore.

use log::{debug, error};

use crate::effect::Effect;
use crate::error::EffectError;
use crate::handle::{EffectHandle, EffectId};
use crate::surface::Target;
use crate::types::{EffectKind, StopReason, TickControl};

/// Completion callback. Runs once, after the final tick's mutation.
pub type Completion<H> = Box<dyn FnOnce(&mut H) + Send>;

/// Result of one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// Ticks fired during this call.
    pub ticks: u32,
    /// Set when the mutator was torn down during this call.
    pub stopped: Option<StopReason>,
}

pub struct TimedMutator<H> {
    effect: Box<dyn Effect>,
    target: Target<H>,
    interval_ms: u32,
    pending_ms: u64,
    next_index: u64,
    handle: EffectHandle,
    on_complete: Option<Completion<H>>,
    started: bool,
    running: bool,
}

impl<H> TimedMutator<H> {
    /// Bind an effect to the region `target` projects out of the host.
    ///
    /// An interval of 0 is raised to 1ms.
    pub fn new(effect: impl Effect + 'static, target: Target<H>) -> Self {
        Self::from_boxed(Box::new(effect), target)
    }

    pub fn from_boxed(effect: Box<dyn Effect>, target: Target<H>) -> Self {
        let interval_ms = effect.interval_ms().max(1);
        Self {
            effect,
            target,
            interval_ms,
            pending_ms: 0,
            next_index: 0,
            handle: EffectHandle::new(),
            on_complete: None,
            started: false,
            running: true,
        }
    }

    /// Attach a completion callback (natural completion only).
    pub fn on_complete(mut self, f: impl FnOnce(&mut H) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn handle(&self) -> EffectHandle {
        self.handle.clone()
    }

    pub fn id(&self) -> EffectId {
        self.handle.id()
    }

    pub fn kind(&self) -> EffectKind {
        self.effect.kind()
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Ticks fired so far.
    pub fn ticks(&self) -> u64 {
        self.next_index
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time until the next tick fires, if still running.
    pub fn next_due_ms(&self) -> Option<u64> {
        if !self.running {
            return None;
        }
        Some((self.interval_ms as u64).saturating_sub(self.pending_ms))
    }

    /// Run the effect's `begin` hook. Idempotent.
    pub fn start(&mut self, host: &mut H) {
        if self.started || !self.running {
            return;
        }
        self.started = true;
        debug!(
            "effect {} ({}) started, interval {}ms",
            self.id(),
            self.kind().as_str(),
            self.interval_ms
        );
        self.effect.begin((self.target)(host));
    }

    /// Add `elapsed_ms` and fire every tick that became due.
    ///
    /// A tick error tears the mutator down before it is returned.
    pub fn advance(&mut self, elapsed_ms: u64, host: &mut H) -> Result<Step, EffectError> {
        let mut step = Step::default();
        if !self.running {
            return Ok(step);
        }
        self.start(host);

        if self.handle.is_cancelled() {
            self.teardown(host, StopReason::Cancelled);
            step.stopped = Some(StopReason::Cancelled);
            return Ok(step);
        }

        self.pending_ms = self.pending_ms.saturating_add(elapsed_ms);
        while self.running && self.pending_ms >= self.interval_ms as u64 {
            self.pending_ms -= self.interval_ms as u64;

            // A completion callback elsewhere may have cancelled us mid-step.
            if self.handle.is_cancelled() {
                self.teardown(host, StopReason::Cancelled);
                step.stopped = Some(StopReason::Cancelled);
                break;
            }

            let index = self.next_index;
            self.next_index += 1;
            step.ticks += 1;

            match self.effect.tick(index, (self.target)(host)) {
                Ok(TickControl::Continue) => {}
                Ok(TickControl::Stop) => {
                    self.teardown(host, StopReason::Completed);
                    step.stopped = Some(StopReason::Completed);
                }
                Err(err) => {
                    error!("effect {} torn down after tick error: {}", self.id(), err);
                    self.teardown(host, StopReason::Failed);
                    return Err(err);
                }
            }
        }

        Ok(step)
    }

    /// Cancel now and tear down immediately.
    ///
    /// Returns `false` if the mutator had already stopped.
    pub fn cancel(&mut self, host: &mut H) -> bool {
        if !self.running {
            return false;
        }
        self.handle.cancel();
        self.teardown(host, StopReason::Cancelled);
        true
    }

    fn teardown(&mut self, host: &mut H, reason: StopReason) {
        if !self.running {
            return;
        }
        self.running = false;
        self.pending_ms = 0;
        if reason != StopReason::Cancelled {
            self.handle.finish();
        }

        if self.started {
            self.effect.end((self.target)(host), reason);
        }

        debug!(
            "effect {} ({}) {} after {} ticks",
            self.id(),
            self.kind().as_str(),
            reason.as_str(),
            self.next_index
        );

        if reason == StopReason::Completed {
            if let Some(callback) = self.on_complete.take() {
                callback(host);
            }
        } else {
            self.on_complete = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::from_fn;
    use crate::surface::{whole, Surface, TextBuffer};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Counts hook calls so teardown can be checked for exactly-once.
    struct Recorder {
        stop_at: u64,
        ends: Arc<AtomicU32>,
        fail_at: Option<u64>,
    }

    impl Effect for Recorder {
        fn kind(&self) -> EffectKind {
            EffectKind::Custom
        }

        fn interval_ms(&self) -> u32 {
            10
        }

        fn tick(&mut self, index: u64, surface: &mut dyn Surface) -> Result<TickControl, EffectError> {
            if self.fail_at == Some(index) {
                return Err(EffectError::tick(EffectKind::Custom, index, "recorder"));
            }
            surface.append_line(&index.to_string());
            if index + 1 >= self.stop_at {
                Ok(TickControl::Stop)
            } else {
                Ok(TickControl::Continue)
            }
        }

        fn end(&mut self, _surface: &mut dyn Surface, _reason: StopReason) {
            self.ends.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn recorder(stop_at: u64, fail_at: Option<u64>) -> (Recorder, Arc<AtomicU32>) {
        let ends = Arc::new(AtomicU32::new(0));
        (
            Recorder {
                stop_at,
                ends: ends.clone(),
                fail_at,
            },
            ends,
        )
    }

    #[test]
    fn ticks_fire_once_per_whole_interval() {
        let (p, _) = recorder(100, None);
        let mut buf = TextBuffer::new();
        let mut m: TimedMutator<TextBuffer> = TimedMutator::new(p, whole);

        assert_eq!(m.advance(9, &mut buf).unwrap().ticks, 0);
        assert_eq!(m.advance(1, &mut buf).unwrap().ticks, 1);
        assert_eq!(m.advance(25, &mut buf).unwrap().ticks, 2);
        assert_eq!(m.next_due_ms(), Some(5));
        assert_eq!(buf.content(), "0\n1\n2");
    }

    #[test]
    fn completion_fires_once_after_final_mutation() {
        let (p, ends) = recorder(3, None);
        let mut buf = TextBuffer::new();
        let mut m = TimedMutator::new(p, whole).on_complete(|b: &mut TextBuffer| {
            // The final tick's line must already be there.
            assert!(b.content().ends_with('2'));
            b.append_line("done");
        });

        let step = m.advance(1000, &mut buf).unwrap();
        assert_eq!(step.ticks, 3);
        assert_eq!(step.stopped, Some(StopReason::Completed));
        assert_eq!(buf.content(), "0\n1\n2\ndone");

        // Further time changes nothing.
        let step = m.advance(1000, &mut buf).unwrap();
        assert_eq!(step, Step::default());
        assert_eq!(ends.load(Ordering::SeqCst), 1);
        assert!(!m.handle().is_live());
    }

    #[test]
    fn cancellation_is_observed_before_the_next_tick_mutates() {
        let (p, ends) = recorder(100, None);
        let mut buf = TextBuffer::new();
        let mut m = TimedMutator::new(p, whole).on_complete(|b: &mut TextBuffer| {
            b.append_line("never");
        });
        let handle = m.handle();

        m.advance(10, &mut buf).unwrap();
        assert!(handle.cancel());
        let step = m.advance(50, &mut buf).unwrap();

        assert_eq!(step.ticks, 0);
        assert_eq!(step.stopped, Some(StopReason::Cancelled));
        assert_eq!(buf.content(), "0");
        assert_eq!(ends.load(Ordering::SeqCst), 1);
        assert!(!m.is_running());
    }

    #[test]
    fn double_teardown_is_a_noop() {
        let (p, ends) = recorder(100, None);
        let mut buf = TextBuffer::new();
        let mut m: TimedMutator<TextBuffer> = TimedMutator::new(p, whole);
        m.advance(10, &mut buf).unwrap();

        assert!(m.cancel(&mut buf));
        assert!(!m.cancel(&mut buf));
        assert!(!m.handle().cancel());
        m.advance(100, &mut buf).unwrap();
        assert_eq!(ends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn tick_error_still_tears_down() {
        let (p, ends) = recorder(100, Some(1));
        let mut buf = TextBuffer::new();
        let mut m = TimedMutator::new(p, whole).on_complete(|b: &mut TextBuffer| {
            b.append_line("never");
        });

        let err = m.advance(100, &mut buf).unwrap_err();
        assert_eq!(err, EffectError::tick(EffectKind::Custom, 1, "recorder"));
        assert!(!m.is_running());
        assert_eq!(m.next_due_ms(), None);
        assert_eq!(ends.load(Ordering::SeqCst), 1);
        assert_eq!(buf.content(), "0");
        assert_eq!(m.advance(100, &mut buf), Ok(Step::default()));
    }

    #[test]
    fn zero_interval_is_raised_to_one_ms() {
        let effect = from_fn(0, |_, _| Ok(TickControl::Continue));
        let m: TimedMutator<TextBuffer> = TimedMutator::new(effect, whole);
        assert_eq!(m.interval_ms(), 1);
    }

    #[test]
    fn tick_indices_are_sequential() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let record = seen.clone();
        let effect = from_fn(5, move |index, _surface: &mut dyn Surface| {
            record.lock().unwrap().push(index);
            Ok(if index == 4 {
                TickControl::Stop
            } else {
                TickControl::Continue
            })
        });
        let mut buf = TextBuffer::new();
        let mut m: TimedMutator<TextBuffer> = TimedMutator::new(effect, whole);
        m.advance(7, &mut buf).unwrap();
        m.advance(3, &mut buf).unwrap();
        m.advance(500, &mut buf).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }
}
