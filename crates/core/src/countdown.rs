//! Countdown effect: one decrement per second until zero.

use crate::effect::Effect;
use crate::error::EffectError;
use crate::surface::Surface;
use crate::types::{EffectKind, TickControl, COUNTDOWN_TEMPLATE, COUNTDOWN_TICK_MS};

#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u64,
    template: String,
}

impl Countdown {
    /// Rejects `seconds <= 0` up front; ticking never has to.
    pub fn new(seconds: i64) -> Result<Self, EffectError> {
        if seconds <= 0 {
            return Err(EffectError::NonPositiveCountdown(seconds));
        }
        Ok(Self {
            remaining: seconds as u64,
            template: COUNTDOWN_TEMPLATE.to_string(),
        })
    }

    /// Replace the render template. `{n}` is substituted with the count.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn render(&self) -> String {
        self.template.replace("{n}", &self.remaining.to_string())
    }
}

impl Effect for Countdown {
    fn kind(&self) -> EffectKind {
        EffectKind::Countdown
    }

    fn interval_ms(&self) -> u32 {
        COUNTDOWN_TICK_MS
    }

    fn tick(&mut self, _index: u64, surface: &mut dyn Surface) -> Result<TickControl, EffectError> {
        self.remaining = self.remaining.saturating_sub(1);
        surface.set_content(&self.render());
        surface.request_redraw();

        if self.remaining == 0 {
            Ok(TickControl::Stop)
        } else {
            Ok(TickControl::Continue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TextBuffer;

    #[test]
    fn rejects_non_positive_start() {
        assert_eq!(
            Countdown::new(0).unwrap_err(),
            EffectError::NonPositiveCountdown(0)
        );
        assert_eq!(
            Countdown::new(-5).unwrap_err(),
            EffectError::NonPositiveCountdown(-5)
        );
    }

    #[test]
    fn renders_each_remaining_value_down_to_zero() {
        let mut countdown = Countdown::new(3).unwrap();
        let mut buf = TextBuffer::new();
        let mut frames = Vec::new();
        loop {
            let control = countdown.tick(0, &mut buf).unwrap();
            frames.push(buf.content().to_string());
            if control == TickControl::Stop {
                break;
            }
        }
        assert_eq!(
            frames,
            vec![
                "Time remaining: 2 seconds",
                "Time remaining: 1 seconds",
                "Time remaining: 0 seconds",
            ]
        );
    }

    #[test]
    fn custom_template() {
        let mut countdown = Countdown::new(1).unwrap().with_template("T-{n}");
        let mut buf = TextBuffer::new();
        assert_eq!(countdown.tick(0, &mut buf), Ok(TickControl::Stop));
        assert_eq!(buf.content(), "T-0");
    }

    #[test]
    fn interval_is_fixed_at_one_second() {
        assert_eq!(Countdown::new(5).unwrap().interval_ms(), 1000);
    }
}
