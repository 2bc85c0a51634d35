//! Scroll effect: append a fixed list of lines, one per tick.

use crate::effect::Effect;
use crate::error::EffectError;
use crate::surface::Surface;
use crate::types::{EffectKind, TickControl, SCROLL_TICK_MS};

/// Single-use line feed. Once every line is appended the effect is spent.
#[derive(Debug, Clone)]
pub struct Scroll {
    lines: Vec<String>,
    interval_ms: u32,
}

impl Scroll {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            interval_ms: SCROLL_TICK_MS,
        }
    }

    pub fn with_interval_ms(mut self, ms: u32) -> Self {
        self.interval_ms = ms;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Effect for Scroll {
    fn kind(&self) -> EffectKind {
        EffectKind::Scroll
    }

    fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn tick(&mut self, index: u64, surface: &mut dyn Surface) -> Result<TickControl, EffectError> {
        let Some(line) = usize::try_from(index).ok().and_then(|i| self.lines.get(i)) else {
            // Nothing (left) to append.
            return Ok(TickControl::Stop);
        };
        surface.append_line(line);
        surface.request_redraw();

        if index + 1 >= self.lines.len() as u64 {
            Ok(TickControl::Stop)
        } else {
            Ok(TickControl::Continue)
        }
    }
}
