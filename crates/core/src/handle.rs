//! Cancellation handles for running effects.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

static NEXT_EFFECT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of one effect instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

impl EffectId {
    pub(crate) fn next() -> Self {
        Self(NEXT_EFFECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Rebuild an id read back from a journal or log.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the periodic trigger behind a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Live,
    Cancelled,
    Finished,
}

const LIVE: u8 = 0;
const CANCELLED: u8 = 1;
const FINISHED: u8 = 2;

/// Cancellation token for one running effect.
///
/// Clones share state. The owner cancels; the engine observes the request no
/// later than its next step and tears the effect down there.
#[derive(Clone)]
pub struct EffectHandle {
    id: EffectId,
    state: Arc<AtomicU8>,
}

impl EffectHandle {
    pub(crate) fn new() -> Self {
        Self {
            id: EffectId::next(),
            state: Arc::new(AtomicU8::new(LIVE)),
        }
    }

    pub fn id(&self) -> EffectId {
        self.id
    }

    pub fn state(&self) -> HandleState {
        match self.state.load(Ordering::Acquire) {
            LIVE => HandleState::Live,
            CANCELLED => HandleState::Cancelled,
            _ => HandleState::Finished,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state() == HandleState::Live
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == HandleState::Cancelled
    }

    /// Request cancellation.
    ///
    /// Returns `true` only on the Live -> Cancelled transition. Cancelling a
    /// finished or already-cancelled effect is a no-op.
    pub fn cancel(&self) -> bool {
        self.state
            .compare_exchange(LIVE, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Engine side: the effect stopped on its own (or failed).
    pub(crate) fn finish(&self) {
        let _ = self
            .state
            .compare_exchange(LIVE, FINISHED, Ordering::AcqRel, Ordering::Acquire);
    }
}

impl fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectHandle")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}
