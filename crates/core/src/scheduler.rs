//! Scheduler: every running effect for one host display.
//!
//! The scheduler does not serialize effects that target the same region.
//! Starting a second effect over a glitch that has not restored yet is the
//! host's call; the glitch will still write its snapshot back when it ends.

use log::error;

use crate::error::EffectError;
use crate::handle::{EffectHandle, EffectId};
use crate::mutator::TimedMutator;
use crate::types::{EffectKind, StopReason};

/// One effect that left the scheduler during an `advance` or `cancel` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finished {
    pub id: EffectId,
    pub kind: EffectKind,
    pub reason: StopReason,
    pub error: Option<EffectError>,
}

/// What happened during one `advance` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub ticks: u32,
    pub finished: Vec<Finished>,
}

impl Report {
    pub fn is_quiet(&self) -> bool {
        self.ticks == 0 && self.finished.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &EffectError> {
        self.finished.iter().filter_map(|f| f.error.as_ref())
    }
}

pub struct Scheduler<H> {
    effects: Vec<TimedMutator<H>>,
}

impl<H> Default for Scheduler<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Scheduler<H> {
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Start `mutator` against `host` and keep it until it stops.
    pub fn spawn(&mut self, host: &mut H, mut mutator: TimedMutator<H>) -> EffectHandle {
        mutator.start(host);
        let handle = mutator.handle();
        self.effects.push(mutator);
        handle
    }

    /// Advance every running effect by `elapsed_ms`, in spawn order.
    pub fn advance(&mut self, elapsed_ms: u64, host: &mut H) -> Report {
        let mut report = Report::default();

        for mutator in self.effects.iter_mut() {
            match mutator.advance(elapsed_ms, host) {
                Ok(step) => {
                    report.ticks += step.ticks;
                    if let Some(reason) = step.stopped {
                        report.finished.push(Finished {
                            id: mutator.id(),
                            kind: mutator.kind(),
                            reason,
                            error: None,
                        });
                    }
                }
                Err(err) => {
                    error!(
                        "{} effect {} failed: {}",
                        mutator.kind().as_str(),
                        mutator.id(),
                        err
                    );
                    report.finished.push(Finished {
                        id: mutator.id(),
                        kind: mutator.kind(),
                        reason: StopReason::Failed,
                        error: Some(err),
                    });
                }
            }
        }

        self.effects.retain(TimedMutator::is_running);
        report
    }

    /// Cancel one effect right away (restoring effects restore now).
    pub fn cancel(&mut self, id: EffectId, host: &mut H) -> Option<Finished> {
        let pos = self.effects.iter().position(|m| m.id() == id)?;
        let mut mutator = self.effects.remove(pos);
        if !mutator.cancel(host) {
            return None;
        }
        Some(Finished {
            id,
            kind: mutator.kind(),
            reason: StopReason::Cancelled,
            error: None,
        })
    }

    /// Cancel everything, newest first.
    pub fn cancel_all(&mut self, host: &mut H) -> Vec<Finished> {
        let mut finished = Vec::with_capacity(self.effects.len());
        while let Some(mut mutator) = self.effects.pop() {
            if mutator.cancel(host) {
                finished.push(Finished {
                    id: mutator.id(),
                    kind: mutator.kind(),
                    reason: StopReason::Cancelled,
                    error: None,
                });
            }
        }
        finished
    }

    pub fn is_running(&self, id: EffectId) -> bool {
        self.effects.iter().any(|m| m.id() == id && m.is_running())
    }

    /// Number of live periodic triggers.
    pub fn active(&self) -> usize {
        self.effects.len()
    }

    pub fn is_idle(&self) -> bool {
        self.effects.is_empty()
    }

    /// Milliseconds until the earliest pending tick.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.effects.iter().filter_map(TimedMutator::next_due_ms).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::from_fn;
    use crate::surface::{whole, Surface, TextBuffer};
    use crate::types::TickControl;
    use crate::Typing;

    #[test]
    fn finished_effects_are_dropped() {
        let mut buf = TextBuffer::new();
        let mut scheduler = Scheduler::new();
        scheduler.spawn(&mut buf, TimedMutator::new(Typing::new("ok"), whole));
        assert_eq!(scheduler.active(), 1);

        let report = scheduler.advance(1_000, &mut buf);
        assert_eq!(report.ticks, 3);
        assert_eq!(report.finished.len(), 1);
        assert_eq!(report.finished[0].reason, StopReason::Completed);
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.next_due_ms(), None);
    }

    #[test]
    fn next_due_is_the_earliest_pending_tick() {
        let mut buf = TextBuffer::new();
        let mut scheduler = Scheduler::new();
        let slow = from_fn(100, |_, _: &mut dyn Surface| Ok(TickControl::Continue));
        let fast = from_fn(30, |_, _: &mut dyn Surface| Ok(TickControl::Continue));
        scheduler.spawn(&mut buf, TimedMutator::new(slow, whole));
        scheduler.spawn(&mut buf, TimedMutator::new(fast, whole));

        assert_eq!(scheduler.next_due_ms(), Some(30));
        scheduler.advance(40, &mut buf);
        assert_eq!(scheduler.next_due_ms(), Some(20));
    }

    #[test]
    fn failing_effect_is_reported_and_removed() {
        let mut buf = TextBuffer::new();
        let mut scheduler = Scheduler::new();
        let bad = from_fn(10, |index, _: &mut dyn Surface| {
            Err(EffectError::tick(EffectKind::Custom, index, "no signal"))
        });
        let handle = scheduler.spawn(&mut buf, TimedMutator::new(bad, whole));

        let report = scheduler.advance(10, &mut buf);
        assert_eq!(report.finished[0].reason, StopReason::Failed);
        assert_eq!(report.errors().count(), 1);
        assert!(scheduler.is_idle());
        assert!(!handle.cancel());
    }

    #[test]
    fn cancel_unknown_or_finished_id_is_none() {
        let mut buf = TextBuffer::new();
        let mut scheduler = Scheduler::new();
        let handle = scheduler.spawn(&mut buf, TimedMutator::new(Typing::new(""), whole));
        scheduler.advance(50, &mut buf);
        assert!(scheduler.cancel(handle.id(), &mut buf).is_none());
    }

    #[test]
    fn cancel_all_empties_the_scheduler() {
        let mut buf = TextBuffer::new();
        let mut scheduler = Scheduler::new();
        let a = scheduler.spawn(&mut buf, TimedMutator::new(Typing::new("abc"), whole));
        let b = scheduler.spawn(&mut buf, TimedMutator::new(Typing::new("xyz"), whole));

        let finished = scheduler.cancel_all(&mut buf);
        assert_eq!(finished.len(), 2);
        assert!(scheduler.is_idle());
        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
    }
}
