//! Typing effect: reveal a fixed string one character per tick.

use crate::effect::Effect;
use crate::error::EffectError;
use crate::surface::Surface;
use crate::types::{EffectKind, TickControl, TYPING_TICK_MS};

#[derive(Debug, Clone)]
pub struct Typing {
    text: String,
    /// Byte offset of every char boundary, including the end of the string.
    boundaries: Vec<usize>,
    interval_ms: u32,
}

impl Typing {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let boundaries = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            text,
            boundaries,
            interval_ms: TYPING_TICK_MS,
        }
    }

    pub fn with_interval_ms(mut self, ms: u32) -> Self {
        self.interval_ms = ms;
        self
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The first `n` chars (clamped).
    pub fn prefix(&self, n: usize) -> &str {
        let end = self.boundaries[n.min(self.len())];
        &self.text[..end]
    }
}

impl Effect for Typing {
    fn kind(&self) -> EffectKind {
        EffectKind::Typing
    }

    fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn tick(&mut self, index: u64, surface: &mut dyn Surface) -> Result<TickControl, EffectError> {
        let revealed = usize::try_from(index).unwrap_or(usize::MAX);
        surface.set_content(self.prefix(revealed));
        surface.request_redraw();

        if revealed >= self.len() {
            Ok(TickControl::Stop)
        } else {
            Ok(TickControl::Continue)
        }
    }
}
